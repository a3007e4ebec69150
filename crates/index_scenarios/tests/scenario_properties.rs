//! Integration tests for the scenario engine.
//!
//! Exercises the public surface end to end: registry construction, input
//! resolution, evaluation and sweeps.

use approx::assert_relative_eq;
use index_core::registry::BaselineRegistry;
use index_core::types::{DomainError, IndexBaseline, NotFoundError, SectorRecord};
use index_scenarios::{
    compute_scenario, resolve_inputs, sweep, AssumptionMode, GlobalAssumptions,
    PerSectorAssumptions, ScenarioEngine, ScenarioError, ScenarioInput, DEFAULT_SWEEP_RANGE,
};

fn equal_weight_registry(base_price: f64, reference_multiple: f64) -> BaselineRegistry {
    BaselineRegistry::new(
        IndexBaseline::new(base_price, reference_multiple).unwrap(),
        vec![
            SectorRecord::new("Cyclicals", 0.5, 10.0).unwrap(),
            SectorRecord::new("Defensives", 0.5, 20.0).unwrap(),
        ],
    )
    .unwrap()
}

#[test]
fn test_harmonic_mean_of_two_equal_weight_sectors() {
    let registry = equal_weight_registry(4000.0, 16.0);
    let input = resolve_inputs(&registry, &GlobalAssumptions::new(0.0, 0.0).into());
    let result = compute_scenario(&registry, &input).unwrap();

    assert_relative_eq!(
        result.index_multiple_forecast,
        1.0 / (0.5 / 10.0 + 0.5 / 20.0),
        epsilon = 1e-12
    );
    assert!((result.index_multiple_forecast - 13.333).abs() < 1e-3);
}

#[test]
fn test_offsetting_growth_leaves_eps_unchanged() {
    let registry = equal_weight_registry(4000.0, 16.0);
    let assumptions = PerSectorAssumptions::new()
        .with_growth("Cyclicals", 0.10)
        .with_growth("Defensives", -0.10);
    let input = resolve_inputs(&registry, &assumptions.into());
    let result = compute_scenario(&registry, &input).unwrap();

    assert_eq!(result.total_weighted_growth, 0.0);
    assert_eq!(result.index_eps_forecast, registry.baseline().base_eps());
}

#[test]
fn test_neutral_scenario_reproduces_base_price() {
    // Reference multiple chosen equal to the aggregate of the current multiples.
    let registry = equal_weight_registry(4000.0, 40.0 / 3.0);
    let input = resolve_inputs(&registry, &GlobalAssumptions::new(0.0, 0.0).into());
    let result = compute_scenario(&registry, &input).unwrap();

    assert_relative_eq!(result.index_price_forecast, 4000.0, epsilon = 1e-9);
    assert_relative_eq!(result.implied_return, 0.0, epsilon = 1e-12);
}

#[test]
fn test_global_mode_equals_explicit_per_sector_mode() {
    let registry = BaselineRegistry::reference();
    let growth = 0.065;

    let global = resolve_inputs(&registry, &GlobalAssumptions::new(growth, 0.0).into());

    let mut explicit = ScenarioInput::new();
    for record in registry.sectors() {
        explicit.set_growth(record.name().clone(), growth);
        explicit.set_target_multiple(record.name().clone(), record.current_multiple());
    }

    assert_eq!(global, explicit);
    assert_eq!(
        compute_scenario(&registry, &global).unwrap(),
        compute_scenario(&registry, &explicit).unwrap()
    );
}

#[test]
fn test_zero_target_multiple_fails_without_inf_or_nan() {
    let registry = BaselineRegistry::reference();
    let mut input = resolve_inputs(&registry, &GlobalAssumptions::new(0.08, 0.0).into());
    input.set_target_multiple("Real Estate", 0.0);

    match compute_scenario(&registry, &input) {
        Err(DomainError::NonPositiveMultiple { sector, multiple }) => {
            assert_eq!(sector, "Real Estate");
            assert_eq!(multiple, 0.0);
        }
        other => panic!("expected domain error, got {:?}", other),
    }
}

#[test]
fn test_minus_hundred_percent_multiple_change_is_rejected_at_boundary() {
    let registry = BaselineRegistry::reference();
    let mode = AssumptionMode::Global(GlobalAssumptions::new(0.08, -1.0));

    assert!(mode.validate(&registry).is_err());

    let input = resolve_inputs(&registry, &mode);
    assert!(compute_scenario(&registry, &input).is_err());
}

#[test]
fn test_reference_end_to_end() {
    let registry = BaselineRegistry::reference();
    let input = resolve_inputs(&registry, &GlobalAssumptions::new(0.08, 0.0).into());
    let result = compute_scenario(&registry, &input).unwrap();

    assert_relative_eq!(registry.baseline().base_eps(), 311.75, epsilon = 0.01);
    assert_relative_eq!(result.index_eps_forecast, 336.69, epsilon = 0.01);
    assert!(
        result.index_multiple_forecast > 22.4 && result.index_multiple_forecast < 22.6,
        "multiple {}",
        result.index_multiple_forecast
    );
    assert!(
        result.index_price_forecast > 7550.0 && result.index_price_forecast < 7600.0,
        "price {}",
        result.index_price_forecast
    );
    assert!(
        result.implied_return > 0.10 && result.implied_return < 0.11,
        "return {}",
        result.implied_return
    );
    assert_relative_eq!(
        result.index_multiple_forecast,
        registry.current_index_multiple(),
        epsilon = 1e-12
    );
}

#[test]
fn test_reference_sweep_bounds_and_order() {
    let registry = BaselineRegistry::reference();
    let input = resolve_inputs(&registry, &GlobalAssumptions::new(0.08, 0.0).into());
    let curve = sweep(&registry, &input, "Information Technology", DEFAULT_SWEEP_RANGE).unwrap();

    let points: Vec<_> = curve.points().collect();
    assert_eq!(points.len(), 24);
    assert_eq!(points[0].multiple, 20.0);
    assert_eq!(points[23].multiple, 43.0);
    assert!(points.windows(2).all(|w| w[0].price <= w[1].price));

    // Tech at its current 29x reproduces the unswept forecast.
    let at_current = points.iter().find(|p| p.multiple == 29.0).unwrap();
    let result = compute_scenario(&registry, &input).unwrap();
    assert_relative_eq!(
        at_current.price,
        result.index_price_forecast,
        epsilon = 1e-8
    );
}

#[test]
fn test_sweep_unknown_sector_is_not_found() {
    let registry = BaselineRegistry::reference();
    let input = resolve_inputs(&registry, &GlobalAssumptions::new(0.08, 0.0).into());
    assert_eq!(
        sweep(&registry, &input, "Crypto", DEFAULT_SWEEP_RANGE).unwrap_err(),
        ScenarioError::NotFound(NotFoundError::new("Crypto"))
    );
}

#[test]
fn test_failed_evaluation_does_not_block_next_one() {
    let registry = BaselineRegistry::reference();
    let engine = ScenarioEngine::new(&registry);

    let bad = PerSectorAssumptions::new().with_target_multiple("Energy", -2.0);
    assert!(engine.evaluate(&bad.into()).is_err());

    let good = PerSectorAssumptions::new().with_target_multiple("Energy", 16.0);
    let result = engine.evaluate(&good.into()).unwrap();
    assert_eq!(result.sector("Energy").unwrap().target_multiple, 16.0);
    assert_eq!(registry, BaselineRegistry::reference());
}
