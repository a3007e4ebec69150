//! Scenario command implementation
//!
//! Evaluates one set of assumptions and prints the price target together
//! with the per-sector breakdown.

use index_scenarios::ScenarioEngine;
use tracing::{debug, info};

use super::{load_registry, AssumptionArgs};
use crate::config::CliConfig;
use crate::output::{render_scenario, OutputFormat};
use crate::Result;

/// Run the scenario command
pub fn run(config: &CliConfig, args: &AssumptionArgs, format: OutputFormat) -> Result<()> {
    info!("Evaluating scenario...");
    let registry = load_registry(config)?;
    let mode = args.to_mode(&registry)?;

    let engine = ScenarioEngine::new(&registry);
    let result = engine.evaluate(&mode)?;
    debug!(
        eps = result.index_eps_forecast,
        multiple = result.index_multiple_forecast,
        price = result.index_price_forecast,
        "Scenario evaluated"
    );

    println!("{}", render_scenario(&registry, &result, format)?);
    info!("Scenario complete");
    Ok(())
}
