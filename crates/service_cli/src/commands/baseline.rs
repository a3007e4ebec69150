//! Baseline command implementation
//!
//! Prints the sector registry and the index anchors.

use tracing::info;

use super::load_registry;
use crate::config::CliConfig;
use crate::output::{render_baseline, OutputFormat};
use crate::Result;

/// Run the baseline command
pub fn run(config: &CliConfig, format: OutputFormat) -> Result<()> {
    info!("Loading baseline...");
    let registry = load_registry(config)?;
    info!("  Sectors: {}", registry.len());

    println!("{}", render_baseline(&registry, format)?);
    Ok(())
}
