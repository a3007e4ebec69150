//! Sweep command implementation
//!
//! Varies one sector's target multiple across a range and prints the
//! resulting price curve.

use index_scenarios::ScenarioEngine;
use tracing::{debug, info};

use super::{load_registry, AssumptionArgs};
use crate::config::CliConfig;
use crate::output::{render_sweep, OutputFormat};
use crate::{CliError, Result};

/// Run the sweep command
pub fn run(
    config: &CliConfig,
    args: &AssumptionArgs,
    sector: &str,
    from: Option<u32>,
    to: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let defaults = config.sweep_range();
    let range = from.unwrap_or(defaults.start)..to.unwrap_or(defaults.end);
    if range.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "Empty sweep range {}..{}",
            range.start, range.end
        )));
    }

    info!("Sweeping {} over {}..{}", sector, range.start, range.end);
    let registry = load_registry(config)?;
    let mode = args.to_mode(&registry)?;

    let engine = ScenarioEngine::new(&registry);
    let input = engine.resolve(&mode);
    let curve = engine.sweep(&input, sector, range)?;
    debug!(points = curve.len(), "Sweep prepared");

    println!("{}", render_sweep(&registry, &curve, format)?);
    info!("Sweep complete");
    Ok(())
}
