//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Assumption flags and
//! registry loading are shared here.

pub mod baseline;
pub mod check;
pub mod scenario;
pub mod sweep;

use clap::Args;
use index_core::registry::BaselineRegistry;
use index_scenarios::{AssumptionMode, GlobalAssumptions, PerSectorAssumptions};
use tracing::{debug, warn};

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Weight-sum drift below which no warning is logged.
const WEIGHT_SUM_DRIFT: f64 = 1e-6;

/// Growth and valuation assumptions shared by `scenario` and `sweep`.
#[derive(Args, Debug, Clone, Default)]
pub struct AssumptionArgs {
    /// Growth applied to every sector, as a fraction (0.08 = 8%)
    #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub growth: f64,

    /// Change applied to every current multiple, in percent
    #[arg(short, long, allow_hyphen_values = true)]
    pub pe_change_pct: Option<f64>,

    /// Per-sector growth override, NAME=FRACTION (repeatable)
    #[arg(long = "sector-growth", value_name = "NAME=FRACTION")]
    pub sector_growth: Vec<String>,

    /// Per-sector target multiple, NAME=MULTIPLE (repeatable)
    #[arg(long = "sector-pe", value_name = "NAME=MULTIPLE")]
    pub sector_pe: Vec<String>,
}

impl AssumptionArgs {
    /// Whether any per-sector flag was given.
    pub fn is_per_sector(&self) -> bool {
        !self.sector_growth.is_empty() || !self.sector_pe.is_empty()
    }

    /// Build and validate the assumption mode against `registry`.
    ///
    /// Any per-sector flag selects per-sector mode, with `--growth` as the
    /// default growth. `--pe-change-pct` only applies in global mode.
    pub fn to_mode(&self, registry: &BaselineRegistry) -> Result<AssumptionMode> {
        let mode = if self.is_per_sector() {
            if self.pe_change_pct.is_some() {
                return Err(CliError::invalid_argument(
                    "--pe-change-pct cannot be combined with --sector-growth or --sector-pe",
                ));
            }
            let mut assumptions = PerSectorAssumptions::new().with_default_growth(self.growth);
            for arg in &self.sector_growth {
                let (name, growth) = parse_assignment(arg)?;
                assumptions.set_growth(registry.sector_id(name)?.clone(), growth);
            }
            for arg in &self.sector_pe {
                let (name, multiple) = parse_assignment(arg)?;
                assumptions.set_target_multiple(registry.sector_id(name)?.clone(), multiple);
            }
            AssumptionMode::PerSector(assumptions)
        } else {
            let pct = self.pe_change_pct.unwrap_or(0.0);
            AssumptionMode::Global(GlobalAssumptions::new(self.growth, pct / 100.0))
        };

        mode.validate(registry)?;
        debug!(?mode, "Assumptions resolved");
        Ok(mode)
    }
}

/// Split `NAME=VALUE` at the last `=` and parse the value.
pub fn parse_assignment(arg: &str) -> Result<(&str, f64)> {
    let (name, value) = arg.rsplit_once('=').ok_or_else(|| {
        CliError::invalid_argument(format!("Expected NAME=VALUE, got {:?}", arg))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "Missing sector name in {:?}",
            arg
        )));
    }
    let value = value.trim().parse::<f64>().map_err(|_| {
        CliError::invalid_argument(format!("Invalid number {:?} for sector {}", value, name))
    })?;
    Ok((name, value))
}

/// Build the registry described by `config`, warning on weight drift.
pub fn load_registry(config: &CliConfig) -> Result<BaselineRegistry> {
    let registry = config.registry()?;
    let sum = registry.weight_sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_DRIFT {
        warn!(
            weight_sum = sum,
            policy = %config.weight_policy,
            "Sector weights do not sum to one"
        );
    }
    debug!(sectors = registry.len(), "Baseline registry loaded");
    Ok(registry)
}
