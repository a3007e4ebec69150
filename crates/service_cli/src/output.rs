//! Table and JSON rendering for command results.

use std::fmt::Write;
use std::str::FromStr;

use index_core::registry::BaselineRegistry;
use index_core::types::SectorRecord;
use index_scenarios::{ScenarioResult, SensitivitySweep, SweepPoint};
use serde::Serialize;

use crate::{CliError, Result};

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct BaselineReport<'a> {
    base_price: f64,
    reference_multiple: f64,
    base_eps: f64,
    weight_sum: f64,
    current_index_multiple: f64,
    sectors: &'a [SectorRecord],
}

#[derive(Serialize)]
struct ScenarioReport<'a> {
    base_price: f64,
    base_eps: f64,
    #[serde(flatten)]
    result: &'a ScenarioResult,
}

#[derive(Serialize)]
struct SweepReport<'a> {
    sector: &'a str,
    weight: f64,
    from: u32,
    to: u32,
    index_eps_forecast: f64,
    points: Vec<SweepPoint>,
}

const RULE: &str = "------------------------------------------------------------------------";

/// Render the registry contents.
pub fn render_baseline(registry: &BaselineRegistry, format: OutputFormat) -> Result<String> {
    let baseline = registry.baseline();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&BaselineReport {
            base_price: baseline.base_price(),
            reference_multiple: baseline.reference_multiple(),
            base_eps: baseline.base_eps(),
            weight_sum: registry.weight_sum(),
            current_index_multiple: registry.current_index_multiple(),
            sectors: registry.sectors(),
        })?),
        OutputFormat::Table => {
            let mut out = String::new();
            writeln!(out, "Base price:          {:>10.2}", baseline.base_price())?;
            writeln!(out, "Reference multiple:  {:>10.2}", baseline.reference_multiple())?;
            writeln!(out, "Base EPS:            {:>10.2}", baseline.base_eps())?;
            writeln!(out, "Weight sum:          {:>10.4}", registry.weight_sum())?;
            writeln!(
                out,
                "Current multiple:    {:>10.2}",
                registry.current_index_multiple()
            )?;
            writeln!(out, "{}", RULE)?;
            writeln!(out, "{:<28} {:>10} {:>12}", "Sector", "Weight", "Multiple")?;
            writeln!(out, "{}", RULE)?;
            for record in registry.sectors() {
                writeln!(
                    out,
                    "{:<28} {:>9.2}% {:>12.2}",
                    record.name(),
                    record.weight() * 100.0,
                    record.current_multiple()
                )?;
            }
            write!(out, "{}", RULE)?;
            Ok(out)
        }
    }
}

/// Render one scenario evaluation with its per-sector breakdown.
pub fn render_scenario(
    registry: &BaselineRegistry,
    result: &ScenarioResult,
    format: OutputFormat,
) -> Result<String> {
    let baseline = registry.baseline();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ScenarioReport {
            base_price: baseline.base_price(),
            base_eps: baseline.base_eps(),
            result,
        })?),
        OutputFormat::Table => {
            let mut out = String::new();
            writeln!(out, "{}", RULE)?;
            writeln!(
                out,
                "{:<28} {:>7} {:>8} {:>8} {:>8} {:>9}",
                "Sector", "Weight", "Growth", "Current", "Target", "Contrib"
            )?;
            writeln!(out, "{}", RULE)?;
            for s in &result.sectors {
                writeln!(
                    out,
                    "{:<28} {:>6.2}% {:>7.2}% {:>8.2} {:>8.2} {:>8.3}%",
                    s.sector,
                    s.weight * 100.0,
                    s.growth * 100.0,
                    s.current_multiple,
                    s.target_multiple,
                    s.weighted_growth * 100.0
                )?;
            }
            writeln!(out, "{}", RULE)?;
            writeln!(
                out,
                "Weighted growth:     {:>9.3}%",
                result.total_weighted_growth * 100.0
            )?;
            writeln!(
                out,
                "EPS forecast:        {:>10.2}  (base {:.2})",
                result.index_eps_forecast,
                baseline.base_eps()
            )?;
            writeln!(
                out,
                "Multiple forecast:   {:>10.2}",
                result.index_multiple_forecast
            )?;
            writeln!(
                out,
                "Price target:        {:>10.2}  (base {:.2})",
                result.index_price_forecast,
                baseline.base_price()
            )?;
            write!(
                out,
                "Implied return:      {:>9.2}%",
                result.implied_return * 100.0
            )?;
            Ok(out)
        }
    }
}

/// Render a sensitivity sweep.
pub fn render_sweep(
    registry: &BaselineRegistry,
    curve: &SensitivitySweep,
    format: OutputFormat,
) -> Result<String> {
    let weight = registry.sector(curve.sector().as_str())?.weight();
    let range = curve.range();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&SweepReport {
            sector: curve.sector().as_str(),
            weight,
            from: range.start,
            to: range.end,
            index_eps_forecast: curve.index_eps_forecast(),
            points: curve.points().collect(),
        })?),
        OutputFormat::Table => {
            let base_price = registry.baseline().base_price();
            let mut out = String::new();
            writeln!(
                out,
                "Sweep of {} target multiple {}..{} (weight {:.2}%, EPS {:.2})",
                curve.sector(),
                range.start,
                range.end,
                weight * 100.0,
                curve.index_eps_forecast()
            )?;
            writeln!(out, "{}", RULE)?;
            writeln!(out, "{:>10} {:>14} {:>10}", "Multiple", "Price", "Return")?;
            writeln!(out, "{}", RULE)?;
            for point in curve {
                writeln!(
                    out,
                    "{:>10.0} {:>14.2} {:>9.2}%",
                    point.multiple,
                    point.price,
                    (point.price / base_price - 1.0) * 100.0
                )?;
            }
            write!(out, "{}", RULE)?;
            Ok(out)
        }
    }
}
