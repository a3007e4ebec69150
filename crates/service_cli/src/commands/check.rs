//! Check command implementation
//!
//! Loads the configuration and baseline and evaluates a neutral scenario,
//! reporting any problem found.

use index_scenarios::{AssumptionMode, GlobalAssumptions, ScenarioEngine};
use tracing::info;

use super::load_registry;
use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");
    info!("  Log level: {}", config.log_level);
    info!("  Weight policy: {}", config.weight_policy);

    let registry = load_registry(config)?;
    let engine = ScenarioEngine::new(&registry);
    let mode: AssumptionMode = GlobalAssumptions::new(0.0, 0.0).into();
    let neutral = engine.evaluate(&mode)?;

    let input = engine.resolve(&mode);
    let mut sweep_points = 0;
    for record in registry.sectors() {
        sweep_points += engine
            .sweep(&input, record.name().as_str(), config.sweep_range())?
            .len();
    }

    println!("Configuration OK");
    println!(
        "  {} sectors, weight sum {:.4}, base EPS {:.2}",
        registry.len(),
        registry.weight_sum(),
        registry.baseline().base_eps()
    );
    println!(
        "  Neutral price {:.2}, {} sweep points across all sectors",
        neutral.index_price_forecast, sweep_points
    );
    Ok(())
}
