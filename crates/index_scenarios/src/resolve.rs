//! Input resolution.
//!
//! Turns either one global assumption pair or an explicit per-sector
//! assumption set into a complete [`ScenarioInput`] covering every sector
//! of the registry.
//!
//! | Mode        | Growth                       | Target multiple                         |
//! |-------------|------------------------------|-----------------------------------------|
//! | `Global`    | `growth` for every sector    | `current × (1 + multiple_change)`       |
//! | `PerSector` | per-sector or `default_growth` | per-sector or the current multiple    |
//!
//! Resolution itself never fails. Range checks belong to the input
//! collection boundary: see [`AssumptionMode::validate`].

use crate::error::ScenarioError;
use crate::input::ScenarioInput;
use index_core::registry::BaselineRegistry;
use index_core::types::{DomainError, NotFoundError, SectorId};
use std::collections::BTreeMap;

/// One growth rate and one relative multiple change applied to every sector.
///
/// `multiple_change` is a fraction: `0.10` lifts every multiple by 10%.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GlobalAssumptions {
    /// Forward growth rate for every sector
    pub growth: f64,
    /// Relative change applied to every current multiple
    pub multiple_change: f64,
}

impl GlobalAssumptions {
    /// Create a global assumption pair.
    pub fn new(growth: f64, multiple_change: f64) -> Self {
        Self {
            growth,
            multiple_change,
        }
    }

    /// Reject non-finite values and multiple changes at or below -100%.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.growth.is_finite() {
            return Err(DomainError::NonFiniteGrowth {
                sector: "*".to_string(),
                growth: self.growth,
            });
        }
        if !self.multiple_change.is_finite() || self.multiple_change <= -1.0 {
            return Err(DomainError::MultipleChangeOutOfRange(self.multiple_change));
        }
        Ok(())
    }
}

/// Independently supplied growth and target multiple per sector.
///
/// # Examples
///
/// ```
/// use index_scenarios::resolve::PerSectorAssumptions;
///
/// let assumptions = PerSectorAssumptions::new()
///     .with_default_growth(0.05)
///     .with_growth("Energy", -0.10)
///     .with_target_multiple("Energy", 12.0);
///
/// assert_eq!(assumptions.growth("Energy"), Some(-0.10));
/// assert_eq!(assumptions.default_growth(), 0.05);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PerSectorAssumptions {
    default_growth: f64,
    growth: BTreeMap<SectorId, f64>,
    target_multiples: BTreeMap<SectorId, f64>,
}

impl PerSectorAssumptions {
    /// Create an empty assumption set (default growth 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Growth used for sectors without an explicit entry.
    pub fn with_default_growth(mut self, growth: f64) -> Self {
        self.default_growth = growth;
        self
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

    /// Set the growth of one sector.
    pub fn set_growth(&mut self, sector: impl Into<SectorId>, growth: f64) {
        self.growth.insert(sector.into(), growth);
    }

    /// Set the target multiple of one sector.
    pub fn set_target_multiple(&mut self, sector: impl Into<SectorId>, multiple: f64) {
        self.target_multiples.insert(sector.into(), multiple);
    }

    /// Growth for sectors without an explicit entry.
    pub fn default_growth(&self) -> f64 {
        self.default_growth
    }

    /// Explicit growth of a sector, if any.
    pub fn growth(&self, sector: &str) -> Option<f64> {
        self.growth.get(sector).copied()
    }

    /// Explicit target multiple of a sector, if any.
    pub fn target_multiple(&self, sector: &str) -> Option<f64> {
        self.target_multiples.get(sector).copied()
    }

    /// Check every explicit entry against the registry.
    ///
    /// # Errors
    ///
    /// - `NotFound` for a sector name the registry does not contain
    /// - `Domain` for a non-finite growth or a target multiple that is not
    ///   strictly positive and finite
    pub fn validate(&self, registry: &BaselineRegistry) -> Result<(), ScenarioError> {
        if !self.default_growth.is_finite() {
            return Err(DomainError::NonFiniteGrowth {
                sector: "*".to_string(),
                growth: self.default_growth,
            }
            .into());
        }
        for (sector, &growth) in &self.growth {
            if !registry.contains(sector) {
                return Err(NotFoundError::new(sector.as_str()).into());
            }
            if !growth.is_finite() {
                return Err(DomainError::NonFiniteGrowth {
                    sector: sector.to_string(),
                    growth,
                }
                .into());
            }
        }
        for (sector, &multiple) in &self.target_multiples {
            if !registry.contains(sector) {
                return Err(NotFoundError::new(sector.as_str()).into());
            }
            if multiple <= 0.0 || !multiple.is_finite() {
                return Err(DomainError::NonPositiveMultiple {
                    sector: sector.to_string(),
                    multiple,
                }
                .into());
            }
        }
        Ok(())
    }
}

/// How scenario assumptions are supplied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AssumptionMode {
    /// One growth rate and multiple change for all sectors
    Global(GlobalAssumptions),
    /// Independent assumptions per sector
    PerSector(PerSectorAssumptions),
}

impl AssumptionMode {
    /// Boundary validation before resolution.
    pub fn validate(&self, registry: &BaselineRegistry) -> Result<(), ScenarioError> {
        match self {
            AssumptionMode::Global(global) => global.validate().map_err(ScenarioError::from),
            AssumptionMode::PerSector(per_sector) => per_sector.validate(registry),
        }
    }
}

impl From<GlobalAssumptions> for AssumptionMode {
    fn from(global: GlobalAssumptions) -> Self {
        AssumptionMode::Global(global)
    }
}

impl From<PerSectorAssumptions> for AssumptionMode {
    fn from(per_sector: PerSectorAssumptions) -> Self {
        AssumptionMode::PerSector(per_sector)
    }
}

/// Resolve assumptions into a complete scenario input.
///
/// The result has exactly one growth and one target multiple entry per
/// registry sector. Per-sector entries naming unknown sectors are ignored.
///
/// # Examples
///
/// ```
/// use index_core::registry::BaselineRegistry;
/// use index_scenarios::resolve::{resolve_inputs, AssumptionMode, GlobalAssumptions};
///
/// let registry = BaselineRegistry::reference();
/// let mode = AssumptionMode::Global(GlobalAssumptions::new(0.08, 0.10));
/// let input = resolve_inputs(&registry, &mode);
///
/// assert_eq!(input.growth("Energy"), Some(0.08));
/// assert!((input.target_multiple("Energy").unwrap() - 15.4).abs() < 1e-12);
/// ```
pub fn resolve_inputs(registry: &BaselineRegistry, mode: &AssumptionMode) -> ScenarioInput {
    let mut input = ScenarioInput::new();
    for record in registry.sectors() {
        let (growth, multiple) = match mode {
            AssumptionMode::Global(global) => (
                global.growth,
                record.current_multiple() * (1.0 + global.multiple_change),
            ),
            AssumptionMode::PerSector(per_sector) => {
                let name = record.name().as_str();
                (
                    per_sector
                        .growth(name)
                        .unwrap_or(per_sector.default_growth()),
                    per_sector
                        .target_multiple(name)
                        .unwrap_or(record.current_multiple()),
                )
            }
        };
        input.set_growth(record.name().clone(), growth);
        input.set_target_multiple(record.name().clone(), multiple);
    }
    input
}
