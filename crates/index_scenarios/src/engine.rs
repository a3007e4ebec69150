//! Scenario execution engine.
//!
//! Evaluates one [`ScenarioInput`] against a [`BaselineRegistry`]:
//!
//! ```text
//! g      = Σ w_i g_i                      total weighted growth
//! EPS'   = EPS_0 × (1 + g)                index EPS forecast
//! M'     = 1 / Σ (w_i / m_i)              index multiple forecast
//! P'     = EPS' × M'                      index price forecast
//! r      = P' / P_0 - 1                   implied return
//! ```
//!
//! Growth contributions are additive across sectors rather than
//! compounding, and the harmonic mean uses the baseline weights rather than
//! weights re-derived from the forecast sector prices.

use crate::error::ScenarioError;
use crate::input::ScenarioInput;
use crate::resolve::{resolve_inputs, AssumptionMode};
use crate::sweep::{sweep, SensitivitySweep};
use index_core::math::{harmonic_denominator, weighted_sum};
use index_core::registry::BaselineRegistry;
use index_core::types::{DomainError, SectorId, SectorRecord};
use std::ops::Range;

/// Per-sector breakdown of one evaluation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SectorContribution {
    /// Sector identifier
    pub sector: SectorId,
    /// Baseline index weight
    pub weight: f64,
    /// Assumed growth
    pub growth: f64,
    /// Current multiple
    pub current_multiple: f64,
    /// Assumed target multiple
    pub target_multiple: f64,
    /// `weight × growth`
    pub weighted_growth: f64,
    /// `target_multiple / current_multiple - 1`
    pub multiple_change: f64,
}

/// Result of one scenario evaluation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioResult {
    /// Σ weight × growth
    pub total_weighted_growth: f64,
    /// Forecast index earnings per share
    pub index_eps_forecast: f64,
    /// Weighted harmonic mean of target multiples
    pub index_multiple_forecast: f64,
    /// Forecast index price
    pub index_price_forecast: f64,
    /// Forecast price over base price, minus one
    pub implied_return: f64,
    /// Breakdown in registry order
    pub sectors: Vec<SectorContribution>,
}

impl ScenarioResult {
    /// Contribution row for a sector.
    pub fn sector(&self, name: &str) -> Option<&SectorContribution> {
        self.sectors.iter().find(|s| s.sector.as_str() == name)
    }

    /// Check if the forecast is above the base price.
    pub fn is_gain(&self) -> bool {
        self.implied_return > 0.0
    }

    /// Check if the forecast is below the base price.
    pub fn is_loss(&self) -> bool {
        self.implied_return < 0.0
    }
}

/// A registry sector paired with its validated assumptions.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SectorAssumption<'a> {
    pub(crate) record: &'a SectorRecord,
    pub(crate) growth: f64,
    pub(crate) target_multiple: f64,
}

/// Pair every registry sector with its assumptions, all-or-nothing.
pub(crate) fn collect_assumptions<'a>(
    registry: &'a BaselineRegistry,
    input: &ScenarioInput,
) -> Result<Vec<SectorAssumption<'a>>, DomainError> {
    registry
        .sectors()
        .iter()
        .map(|record| {
            let name = record.name().as_str();
            let growth = input
                .growth(name)
                .ok_or_else(|| DomainError::MissingGrowth(name.to_string()))?;
            let target_multiple = input
                .target_multiple(name)
                .ok_or_else(|| DomainError::MissingTargetMultiple(name.to_string()))?;

            if !growth.is_finite() {
                return Err(DomainError::NonFiniteGrowth {
                    sector: name.to_string(),
                    growth,
                });
            }
            if target_multiple <= 0.0 || !target_multiple.is_finite() {
                return Err(DomainError::NonPositiveMultiple {
                    sector: name.to_string(),
                    multiple: target_multiple,
                });
            }

            Ok(SectorAssumption {
                record,
                growth,
                target_multiple,
            })
        })
        .collect()
}

/// Σ weight × growth over validated assumptions.
pub(crate) fn sum_weighted_growth(assumptions: &[SectorAssumption<'_>]) -> f64 {
    weighted_sum(
        assumptions
            .iter()
            .map(|a| (a.record.weight(), a.growth)),
    )
}

/// Reject a computed quantity that overflowed to infinity or NaN.
pub(crate) fn ensure_finite(quantity: &str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFiniteResult {
            quantity: quantity.to_string(),
            value,
        })
    }
}

/// Evaluate a scenario.
///
/// # Errors
///
/// Returns a `DomainError` if the input lacks an entry for a registry
/// sector, a growth value is non-finite, a target multiple is not
/// strictly positive, or any computed quantity overflows. No partial
/// result is produced.
///
/// # Examples
///
/// ```
/// use index_core::registry::BaselineRegistry;
/// use index_core::types::{IndexBaseline, SectorRecord};
/// use index_scenarios::{compute_scenario, ScenarioInput};
///
/// let registry = BaselineRegistry::new(
///     IndexBaseline::new(1000.0, 20.0).unwrap(),
///     vec![
///         SectorRecord::new("A", 0.5, 10.0).unwrap(),
///         SectorRecord::new("B", 0.5, 20.0).unwrap(),
///     ],
/// )
/// .unwrap();
///
/// let input = ScenarioInput::new()
///     .with_growth("A", 0.10)
///     .with_growth("B", -0.10)
///     .with_target_multiple("A", 10.0)
///     .with_target_multiple("B", 20.0);
///
/// let result = compute_scenario(&registry, &input).unwrap();
/// assert_eq!(result.index_eps_forecast, 50.0);
/// assert!((result.index_multiple_forecast - 40.0 / 3.0).abs() < 1e-12);
/// ```
pub fn compute_scenario(
    registry: &BaselineRegistry,
    input: &ScenarioInput,
) -> Result<ScenarioResult, DomainError> {
    let assumptions = collect_assumptions(registry, input)?;

    let total_weighted_growth = sum_weighted_growth(&assumptions);
    let index_eps_forecast = ensure_finite(
        "EPS forecast",
        registry.baseline().base_eps() * (1.0 + total_weighted_growth),
    )?;

    let denominator = harmonic_denominator(
        assumptions
            .iter()
            .map(|a| (a.record.weight(), a.target_multiple)),
    )
    .ok_or(DomainError::DegenerateWeights)?;
    let denominator = ensure_finite("harmonic denominator", denominator)?;
    if denominator <= 0.0 {
        return Err(DomainError::DegenerateWeights);
    }
    let index_multiple_forecast = denominator.recip();

    let index_price_forecast =
        ensure_finite("price forecast", index_eps_forecast * index_multiple_forecast)?;
    let implied_return = ensure_finite(
        "implied return",
        index_price_forecast / registry.baseline().base_price() - 1.0,
    )?;

    let sectors = assumptions
        .iter()
        .map(|a| SectorContribution {
            sector: a.record.name().clone(),
            weight: a.record.weight(),
            growth: a.growth,
            current_multiple: a.record.current_multiple(),
            target_multiple: a.target_multiple,
            weighted_growth: a.record.weight() * a.growth,
            multiple_change: a.target_multiple / a.record.current_multiple() - 1.0,
        })
        .collect();

    Ok(ScenarioResult {
        total_weighted_growth,
        index_eps_forecast,
        index_multiple_forecast,
        index_price_forecast,
        implied_return,
        sectors,
    })
}

/// Borrowed view over a registry bundling resolution, evaluation and sweeps.
///
/// # Examples
///
/// ```
/// use index_core::registry::BaselineRegistry;
/// use index_scenarios::{GlobalAssumptions, ScenarioEngine};
///
/// let registry = BaselineRegistry::reference();
/// let engine = ScenarioEngine::new(&registry);
///
/// let result = engine.evaluate(&GlobalAssumptions::new(0.08, 0.0).into()).unwrap();
/// assert!(result.is_gain());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ScenarioEngine<'a> {
    registry: &'a BaselineRegistry,
}

impl<'a> ScenarioEngine<'a> {
    /// Create an engine over a registry.
    pub fn new(registry: &'a BaselineRegistry) -> Self {
        Self { registry }
    }

    /// The registry being evaluated against.
    pub fn registry(&self) -> &'a BaselineRegistry {
        self.registry
    }

    /// Resolve assumptions into a complete input.
    pub fn resolve(&self, mode: &AssumptionMode) -> ScenarioInput {
        resolve_inputs(self.registry, mode)
    }

    /// Evaluate a complete input.
    pub fn compute(&self, input: &ScenarioInput) -> Result<ScenarioResult, DomainError> {
        compute_scenario(self.registry, input)
    }

    /// Validate, resolve and evaluate in one step.
    pub fn evaluate(&self, mode: &AssumptionMode) -> Result<ScenarioResult, ScenarioError> {
        mode.validate(self.registry)?;
        let input = self.resolve(mode);
        Ok(self.compute(&input)?)
    }

    /// Prepare a sensitivity sweep of one sector's target multiple.
    pub fn sweep(
        &self,
        input: &ScenarioInput,
        sector: &str,
        range: Range<u32>,
    ) -> Result<SensitivitySweep, ScenarioError> {
        sweep(self.registry, input, sector, range)
    }
}
