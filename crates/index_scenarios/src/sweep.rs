//! Sensitivity sweeps over one sector's target multiple.
//!
//! Everything except the swept multiple is fixed, so the index EPS forecast
//! and the harmonic contribution of the other sectors are computed once:
//!
//! ```text
//! P(v) = EPS' / (R + w_s / v),    R = Σ_{i≠s} w_i / m_i
//! ```
//!
//! For `w_s ≥ 0`, `P` is non-decreasing in `v` while `EPS' ≥ 0` and
//! non-increasing once total weighted growth drops below -1.

use crate::engine::{collect_assumptions, ensure_finite, sum_weighted_growth};
use crate::error::ScenarioError;
use crate::input::ScenarioInput;
use index_core::math::harmonic_denominator;
use index_core::registry::BaselineRegistry;
use index_core::types::{DomainError, SectorId};
use std::iter::FusedIterator;
use std::ops::Range;

/// Multiples swept by the reference deployment: 20x up to (excluding) 44x.
pub const DEFAULT_SWEEP_RANGE: Range<u32> = 20..44;

/// One point of a sensitivity curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepPoint {
    /// Swept target multiple
    pub multiple: f64,
    /// Resulting index price forecast
    pub price: f64,
}

/// A prepared sweep: restartable, deterministic and evaluated lazily.
///
/// # Examples
///
/// ```
/// use index_core::registry::BaselineRegistry;
/// use index_scenarios::{resolve_inputs, sweep, GlobalAssumptions};
///
/// let registry = BaselineRegistry::reference();
/// let input = resolve_inputs(&registry, &GlobalAssumptions::new(0.08, 0.0).into());
///
/// let curve = sweep(&registry, &input, "Information Technology", 20..44).unwrap();
/// assert_eq!(curve.len(), 24);
///
/// let prices: Vec<f64> = curve.points().map(|p| p.price).collect();
/// assert!(prices.windows(2).all(|w| w[0] <= w[1]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SensitivitySweep {
    sector: SectorId,
    weight: f64,
    index_eps_forecast: f64,
    residual_denominator: f64,
    range: Range<u32>,
}

impl SensitivitySweep {
    /// Swept sector.
    pub fn sector(&self) -> &SectorId {
        &self.sector
    }

    /// Swept values, start inclusive, end exclusive.
    pub fn range(&self) -> Range<u32> {
        self.range.clone()
    }

    /// Index EPS forecast shared by every point.
    pub fn index_eps_forecast(&self) -> f64 {
        self.index_eps_forecast
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether the range is empty.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Iterate over the curve from the start of the range.
    pub fn points(&self) -> SweepPoints<'_> {
        SweepPoints {
            sweep: self,
            values: self.range.clone(),
        }
    }

    fn point(&self, value: u32) -> SweepPoint {
        let multiple = f64::from(value);
        let index_multiple = (self.residual_denominator + self.weight / multiple).recip();
        SweepPoint {
            multiple,
            price: self.index_eps_forecast * index_multiple,
        }
    }
}

impl<'a> IntoIterator for &'a SensitivitySweep {
    type Item = SweepPoint;
    type IntoIter = SweepPoints<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

/// Iterator over the points of a [`SensitivitySweep`].
#[derive(Clone, Debug)]
pub struct SweepPoints<'a> {
    sweep: &'a SensitivitySweep,
    values: Range<u32>,
}

impl Iterator for SweepPoints<'_> {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next().map(|v| self.sweep.point(v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl DoubleEndedIterator for SweepPoints<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.values.next_back().map(|v| self.sweep.point(v))
    }
}

impl ExactSizeIterator for SweepPoints<'_> {}

impl FusedIterator for SweepPoints<'_> {}

/// Prepare a sweep of `sector`'s target multiple across `range`.
///
/// Every other input is held at its value in `input`. Validation is eager,
/// so iterating the returned sweep cannot fail.
///
/// # Errors
///
/// - `NotFound` if `sector` is not in the registry
/// - `Domain` if `input` would fail [`compute_scenario`](crate::compute_scenario),
///   if the range is non-empty and starts at zero, or if a point of the
///   curve would overflow
pub fn sweep(
    registry: &BaselineRegistry,
    input: &ScenarioInput,
    sector: &str,
    range: Range<u32>,
) -> Result<SensitivitySweep, ScenarioError> {
    let swept = registry.sector(sector)?;
    let assumptions = collect_assumptions(registry, input)?;

    if !range.is_empty() && range.start == 0 {
        return Err(DomainError::NonPositiveMultiple {
            sector: sector.to_string(),
            multiple: 0.0,
        }
        .into());
    }

    let index_eps_forecast = ensure_finite(
        "EPS forecast",
        registry.baseline().base_eps() * (1.0 + sum_weighted_growth(&assumptions)),
    )?;
    let residual_denominator = harmonic_denominator(
        assumptions
            .iter()
            .filter(|a| a.record.name() != swept.name())
            .map(|a| (a.record.weight(), a.target_multiple)),
    )
    .ok_or(DomainError::DegenerateWeights)?;
    let residual_denominator = ensure_finite("harmonic denominator", residual_denominator)?;

    if residual_denominator <= 0.0 && swept.weight() <= 0.0 {
        return Err(DomainError::DegenerateWeights.into());
    }

    let curve = SensitivitySweep {
        sector: swept.name().clone(),
        weight: swept.weight(),
        index_eps_forecast,
        residual_denominator,
        range,
    };

    // |P| grows with v, so the last point bounds every other one.
    if let Some(last) = curve.points().next_back() {
        ensure_finite("price forecast", last.price)?;
    }
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_scenario;
    use crate::resolve::{resolve_inputs, GlobalAssumptions};
    use approx::assert_relative_eq;
    use index_core::types::{IndexBaseline, NotFoundError, SectorRecord};

    fn reference_input(registry: &BaselineRegistry) -> ScenarioInput {
        resolve_inputs(registry, &GlobalAssumptions::new(0.08, 0.0).into())
    }

    #[test]
    fn test_default_range() {
        assert_eq!(DEFAULT_SWEEP_RANGE.start, 20);
        assert_eq!(DEFAULT_SWEEP_RANGE.end, 44);
        assert_eq!(DEFAULT_SWEEP_RANGE.len(), 24);
    }

    #[test]
    fn test_sweep_matches_engine_at_each_point() {
        let registry = BaselineRegistry::reference();
        let input = reference_input(&registry);
        let curve = sweep(&registry, &input, "Financials", 10..30).unwrap();

        for point in &curve {
            let mut bumped = input.clone();
            bumped.set_target_multiple("Financials", point.multiple);
            let direct = compute_scenario(&registry, &bumped).unwrap();
            assert_relative_eq!(point.price, direct.index_price_forecast, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_sweep_shared_eps() {
        let registry = BaselineRegistry::reference();
        let input = reference_input(&registry);
        let curve = sweep(&registry, &input, "Energy", DEFAULT_SWEEP_RANGE).unwrap();
        let result = compute_scenario(&registry, &input).unwrap();
        assert_relative_eq!(
            curve.index_eps_forecast(),
            result.index_eps_forecast,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_sweep_is_restartable() {
        let registry = BaselineRegistry::reference();
        let input = reference_input(&registry);
        let curve = sweep(&registry, &input, "Utilities", DEFAULT_SWEEP_RANGE).unwrap();

        let first: Vec<SweepPoint> = curve.points().collect();
        let second: Vec<SweepPoint> = curve.points().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), curve.len());
        assert_eq!(first[0].multiple, 20.0);
        assert_eq!(first[first.len() - 1].multiple, 43.0);
    }

    #[test]
    fn test_sweep_iterator_is_exact_size_and_reversible() {
        let registry = BaselineRegistry::reference();
        let input = reference_input(&registry);
        let curve = sweep(&registry, &input, "Energy", 20..25).unwrap();

        let mut points = curve.points();
        assert_eq!(points.len(), 5);
        points.next();
        assert_eq!(points.len(), 4);
        assert_eq!(points.next_back().map(|p| p.multiple), Some(24.0));
    }

    #[test]
    fn test_sweep_unknown_sector() {
        let registry = BaselineRegistry::reference();
        let input = reference_input(&registry);
        assert_eq!(
            sweep(&registry, &input, "Crypto", DEFAULT_SWEEP_RANGE),
            Err(ScenarioError::NotFound(NotFoundError::new("Crypto")))
        );
    }

    #[test]
    fn test_sweep_rejects_zero_start() {
        let registry = BaselineRegistry::reference();
        let input = reference_input(&registry);
        let err = sweep(&registry, &input, "Energy", 0..10).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Domain(DomainError::NonPositiveMultiple { .. })
        ));
    }

    #[test]
    fn test_sweep_rejects_bad_fixed_input() {
        let registry = BaselineRegistry::reference();
        let mut input = reference_input(&registry);
        input.set_target_multiple("Materials", 0.0);
        let err = sweep(&registry, &input, "Energy", DEFAULT_SWEEP_RANGE).unwrap_err();
        assert!(matches!(err, ScenarioError::Domain(_)));
    }

    #[test]
    fn test_sweep_empty_range() {
        let registry = BaselineRegistry::reference();
        let input = reference_input(&registry);
        let curve = sweep(&registry, &input, "Energy", 30..30).unwrap();
        assert!(curve.is_empty());
        assert_eq!(curve.points().count(), 0);
    }

    #[test]
    fn test_sweep_single_sector_registry() {
        let registry = BaselineRegistry::new(
            IndexBaseline::new(1000.0, 20.0).unwrap(),
            vec![SectorRecord::new("Only", 1.0, 20.0).unwrap()],
        )
        .unwrap();
        let input = ScenarioInput::new()
            .with_growth("Only", 0.0)
            .with_target_multiple("Only", 20.0);
        let curve = sweep(&registry, &input, "Only", 10..12).unwrap();
        let prices: Vec<f64> = curve.points().map(|p| p.price).collect();
        assert_relative_eq!(prices[0], 500.0, epsilon = 1e-9);
        assert_relative_eq!(prices[1], 550.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sweep_rejects_overflowing_inputs() {
        let registry = BaselineRegistry::reference();

        let huge = resolve_inputs(&registry, &GlobalAssumptions::new(1e308, 0.0).into());
        assert!(matches!(
            sweep(&registry, &huge, "Energy", DEFAULT_SWEEP_RANGE),
            Err(ScenarioError::Domain(DomainError::NonFiniteResult { .. }))
        ));

        let mut tiny = reference_input(&registry);
        tiny.set_target_multiple("Utilities", 1e-320);
        assert!(matches!(
            sweep(&registry, &tiny, "Energy", DEFAULT_SWEEP_RANGE),
            Err(ScenarioError::Domain(DomainError::NonFiniteResult { .. }))
        ));
    }

    #[test]
    fn test_sweep_negative_eps_is_non_increasing() {
        let registry = BaselineRegistry::reference();
        let input = resolve_inputs(&registry, &GlobalAssumptions::new(-1.5, 0.0).into());
        let curve = sweep(&registry, &input, "Energy", 20..23).unwrap();

        assert!(curve.index_eps_forecast() < 0.0);
        let prices: Vec<f64> = curve.points().map(|p| p.price).collect();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]), "{:?}", prices);
    }

    #[test]
    fn test_sweep_reports_its_range() {
        let registry = BaselineRegistry::reference();
        let input = reference_input(&registry);
        let curve = sweep(&registry, &input, "Materials", 15..18).unwrap();

        assert_eq!(curve.range(), 15..18);
        let multiples: Vec<f64> = curve.points().map(|p| p.multiple).collect();
        assert_eq!(multiples, vec![15.0, 16.0, 17.0]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_sweep_monotone_non_decreasing(
                growth in -0.2f64..0.5,
                multiple_change in -0.5f64..0.5,
                sector_index in 0usize..11,
                start in 1u32..40,
                width in 1u32..40,
            ) {
                let registry = BaselineRegistry::reference();
                let input = resolve_inputs(
                    &registry,
                    &GlobalAssumptions::new(growth, multiple_change).into(),
                );
                let name = registry.sectors()[sector_index].name().as_str();
                let curve = sweep(&registry, &input, name, start..start + width).unwrap();

                let prices: Vec<f64> = curve.points().map(|p| p.price).collect();
                for pair in prices.windows(2) {
                    prop_assert!(pair[0] <= pair[1], "{} > {}", pair[0], pair[1]);
                }
            }
        }
    }
}
