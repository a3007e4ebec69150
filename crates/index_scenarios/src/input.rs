//! Scenario input: one complete set of per-sector assumptions.

use index_core::types::SectorId;
use std::collections::BTreeMap;

/// Per-sector growth and target multiple assumptions for one evaluation.
///
/// Built once per evaluation (usually by
/// [`resolve_inputs`](crate::resolve::resolve_inputs)) and passed by
/// reference into the engine. Entries for sectors the registry does not
/// know are ignored by the engine.
///
/// # Examples
///
/// ```
/// use index_scenarios::ScenarioInput;
///
/// let input = ScenarioInput::new()
///     .with_growth("Energy", 0.05)
///     .with_target_multiple("Energy", 15.0);
///
/// assert_eq!(input.growth("Energy"), Some(0.05));
/// assert_eq!(input.target_multiple("Energy"), Some(15.0));
/// assert_eq!(input.growth("Utilities"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioInput {
    growth_by_sector: BTreeMap<SectorId, f64>,
    target_multiple_by_sector: BTreeMap<SectorId, f64>,
}

impl ScenarioInput {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style growth assignment.
    pub fn with_growth(mut self, sector: impl Into<SectorId>, growth: f64) -> Self {
        self.set_growth(sector, growth);
        self
    }

    /// Builder-style target multiple assignment.
    pub fn with_target_multiple(mut self, sector: impl Into<SectorId>, multiple: f64) -> Self {
        self.set_target_multiple(sector, multiple);
        self
    }

    /// Set the growth assumption of a sector.
    pub fn set_growth(&mut self, sector: impl Into<SectorId>, growth: f64) {
        self.growth_by_sector.insert(sector.into(), growth);
    }

    /// Set the target multiple of a sector.
    pub fn set_target_multiple(&mut self, sector: impl Into<SectorId>, multiple: f64) {
        self.target_multiple_by_sector.insert(sector.into(), multiple);
    }

    /// Growth assumption for a sector, if present.
    pub fn growth(&self, sector: &str) -> Option<f64> {
        self.growth_by_sector.get(sector).copied()
    }

    /// Target multiple for a sector, if present.
    pub fn target_multiple(&self, sector: &str) -> Option<f64> {
        self.target_multiple_by_sector.get(sector).copied()
    }

    /// All growth assumptions, ordered by sector name.
    pub fn growth_by_sector(&self) -> &BTreeMap<SectorId, f64> {
        &self.growth_by_sector
    }

    /// All target multiples, ordered by sector name.
    pub fn target_multiple_by_sector(&self) -> &BTreeMap<SectorId, f64> {
        &self.target_multiple_by_sector
    }
}
