//! Immutable baseline registry.
//!
//! A `BaselineRegistry` holds the ordered sector records of an index and its
//! `IndexBaseline`. It is validated once on construction and read-only for
//! the rest of the process lifetime; scenario evaluation only ever borrows it.
//!
//! ## Weight sums
//!
//! Sector weights are expected to sum to one. What happens when they do not
//! is chosen per registry through [`WeightPolicy`]:
//!
//! | Policy     | Behaviour                                     |
//! |------------|-----------------------------------------------|
//! | `Unchecked`| Weights used as supplied                      |
//! | `Strict`   | Reject if `|Σw - 1|` exceeds the tolerance    |
//! | `Normalise`| Rescale every weight by `1 / Σw`              |

use crate::math::weighted_harmonic_mean;
use crate::types::{ConfigurationError, IndexBaseline, NotFoundError, SectorId, SectorRecord};
use std::collections::HashSet;

/// Reference index level.
pub const REFERENCE_BASE_PRICE: f64 = 6858.47;

/// Reference index multiple used to derive the base EPS.
pub const REFERENCE_MULTIPLE: f64 = 22.0;

/// Reference sectors: (name, weight, current multiple).
pub const REFERENCE_SECTORS: [(&str, f64, f64); 11] = [
    ("Information Technology", 0.340, 29.0),
    ("Financials", 0.130, 17.0),
    ("Consumer Discretionary", 0.105, 28.0),
    ("Health Care", 0.095, 18.0),
    ("Communication Services", 0.095, 21.0),
    ("Industrials", 0.085, 22.0),
    ("Consumer Staples", 0.055, 21.0),
    ("Energy", 0.030, 14.0),
    ("Utilities", 0.025, 18.0),
    ("Real Estate", 0.020, 35.0),
    ("Materials", 0.020, 20.0),
];

/// How a registry treats sector weights that do not sum to one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WeightPolicy {
    /// Use weights as supplied.
    #[default]
    Unchecked,
    /// Reject weights whose sum deviates from one by more than `tolerance`.
    Strict {
        /// Allowed absolute deviation of the sum from one
        tolerance: f64,
    },
    /// Rescale weights so that they sum to one.
    Normalise,
}

/// Ordered, validated sector records plus the index baseline.
///
/// # Examples
///
/// ```
/// use index_core::registry::BaselineRegistry;
/// use index_core::types::{IndexBaseline, SectorRecord};
///
/// let registry = BaselineRegistry::new(
///     IndexBaseline::new(1000.0, 20.0).unwrap(),
///     vec![
///         SectorRecord::new("Growth", 0.5, 30.0).unwrap(),
///         SectorRecord::new("Value", 0.5, 12.0).unwrap(),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(registry.len(), 2);
/// assert!(registry.sector("Value").is_ok());
/// assert!(registry.sector("Crypto").is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BaselineRegistry {
    baseline: IndexBaseline,
    sectors: Vec<SectorRecord>,
}

impl BaselineRegistry {
    /// Creates a registry, using weights as supplied.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the sector list is empty, contains
    /// duplicate names, any record is malformed, or all weights are zero.
    pub fn new(
        baseline: IndexBaseline,
        sectors: Vec<SectorRecord>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_policy(baseline, sectors, WeightPolicy::Unchecked)
    }

    /// Creates a registry, applying `policy` to the weight sum.
    ///
    /// # Errors
    ///
    /// As [`BaselineRegistry::new`], plus `WeightSum` under a strict policy
    /// and `NonFiniteValue` for a non-finite strict tolerance.
    pub fn with_policy(
        baseline: IndexBaseline,
        sectors: Vec<SectorRecord>,
        policy: WeightPolicy,
    ) -> Result<Self, ConfigurationError> {
        if sectors.is_empty() {
            return Err(ConfigurationError::EmptyRegistry);
        }

        let mut seen = HashSet::with_capacity(sectors.len());
        for record in &sectors {
            record.validate()?;
            if !seen.insert(record.name().as_str()) {
                return Err(ConfigurationError::DuplicateSector(
                    record.name().to_string(),
                ));
            }
        }

        let sum: f64 = sectors.iter().map(SectorRecord::weight).sum();
        if sum <= 0.0 {
            return Err(ConfigurationError::ZeroTotalWeight);
        }

        let sectors = match policy {
            WeightPolicy::Unchecked => sectors,
            WeightPolicy::Strict { tolerance } => {
                if !tolerance.is_finite() || tolerance < 0.0 {
                    return Err(ConfigurationError::NonFiniteValue {
                        field: "weight_tolerance".to_string(),
                        value: tolerance,
                    });
                }
                if (sum - 1.0).abs() > tolerance {
                    return Err(ConfigurationError::WeightSum { sum, tolerance });
                }
                sectors
            }
            WeightPolicy::Normalise => {
                let factor = sum.recip();
                sectors.iter().map(|s| s.rescaled(factor)).collect()
            }
        };

        Ok(Self { baseline, sectors })
    }

    /// The hardcoded reference deployment: eleven sectors of a large-cap
    /// equity index at a level of 6858.47 and a reference multiple of 22.
    pub fn reference() -> Self {
        let sectors = REFERENCE_SECTORS
            .iter()
            .map(|&(name, weight, multiple)| {
                SectorRecord::new(name, weight, multiple)
                    .unwrap_or_else(|e| unreachable!("reference sector {name} is valid: {e}"))
            })
            .collect();
        let baseline = IndexBaseline::new(REFERENCE_BASE_PRICE, REFERENCE_MULTIPLE)
            .unwrap_or_else(|e| unreachable!("reference baseline is valid: {e}"));
        Self { baseline, sectors }
    }

    /// Index-level anchors.
    #[inline]
    pub fn baseline(&self) -> &IndexBaseline {
        &self.baseline
    }

    /// Sector records in registry order.
    #[inline]
    pub fn sectors(&self) -> &[SectorRecord] {
        &self.sectors
    }

    /// Number of sectors.
    #[inline]
    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    /// Always false: construction rejects empty registries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Looks up a sector by name.
    pub fn sector(&self, name: &str) -> Result<&SectorRecord, NotFoundError> {
        self.sectors
            .iter()
            .find(|s| s.name().as_str() == name)
            .ok_or_else(|| NotFoundError::new(name))
    }

    /// Resolves a name to the registry's own identifier.
    pub fn sector_id(&self, name: &str) -> Result<&SectorId, NotFoundError> {
        self.sector(name).map(SectorRecord::name)
    }

    /// Whether the registry contains a sector with this identifier.
    pub fn contains(&self, id: &SectorId) -> bool {
        self.sectors.iter().any(|s| s.name() == id)
    }

    /// Sum of all sector weights.
    pub fn weight_sum(&self) -> f64 {
        self.sectors.iter().map(SectorRecord::weight).sum()
    }

    /// Weighted harmonic mean of the current sector multiples.
    ///
    /// This is the aggregate multiple the sector data implies today, which
    /// generally differs from `baseline().reference_multiple()`.
    pub fn current_index_multiple(&self) -> f64 {
        // Construction guarantees positive multiples and a positive weight sum.
        weighted_harmonic_mean(
            self.sectors
                .iter()
                .map(|s| (s.weight(), s.current_multiple())),
        )
        .unwrap_or(f64::NAN)
    }
}
