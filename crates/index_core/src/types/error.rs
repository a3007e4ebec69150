//! Error types for structured error handling.
//!
//! This module provides:
//! - `ConfigurationError`: Malformed baseline data at construction time
//! - `DomainError`: Scenario inputs outside the domain of the aggregation formulas
//! - `NotFoundError`: Lookup of a sector name absent from the registry
//!
//! All three are terminal for the evaluation in progress. None of them can
//! leave a registry in a partially constructed or mutated state.

use thiserror::Error;

/// Errors raised while constructing a baseline registry.
///
/// # Examples
/// ```
/// use index_core::types::ConfigurationError;
///
/// let err = ConfigurationError::NegativeWeight { sector: "Energy".to_string(), weight: -0.1 };
/// assert_eq!(format!("{}", err), "Sector Energy has negative weight: -0.1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Registry was constructed without any sectors.
    #[error("Baseline registry has no sectors")]
    EmptyRegistry,

    /// Sector name is empty or whitespace.
    #[error("Sector name must not be empty")]
    EmptySectorName,

    /// Two sectors share a name.
    #[error("Duplicate sector: {0}")]
    DuplicateSector(String),

    /// Sector weight is below zero.
    #[error("Sector {sector} has negative weight: {weight}")]
    NegativeWeight {
        /// Offending sector
        sector: String,
        /// Supplied weight
        weight: f64,
    },

    /// Sector current multiple is zero or below.
    #[error("Sector {sector} has non-positive current multiple: {multiple}")]
    NonPositiveMultiple {
        /// Offending sector
        sector: String,
        /// Supplied multiple
        multiple: f64,
    },

    /// A supplied constant is NaN or infinite.
    #[error("Non-finite value for {field}: {value}")]
    NonFiniteValue {
        /// Name of the field
        field: String,
        /// Supplied value
        value: f64,
    },

    /// Index base price is zero or below.
    #[error("Index base price must be positive, got {0}")]
    NonPositivePrice(f64),

    /// Index reference multiple is zero or below.
    #[error("Index reference multiple must be positive, got {0}")]
    NonPositiveReferenceMultiple(f64),

    /// All sector weights are zero.
    #[error("Sector weights sum to zero")]
    ZeroTotalWeight,

    /// Weight sum outside the tolerance of a strict registry.
    #[error("Sector weights sum to {sum}, expected 1 within {tolerance}")]
    WeightSum {
        /// Actual sum of weights
        sum: f64,
        /// Allowed deviation from 1
        tolerance: f64,
    },
}

/// Errors raised when scenario inputs fall outside the formulas' domain.
///
/// # Examples
/// ```
/// use index_core::types::DomainError;
///
/// let err = DomainError::NonPositiveMultiple { sector: "Utilities".to_string(), multiple: 0.0 };
/// assert!(format!("{}", err).contains("must be positive"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Target multiple is zero, negative or non-finite.
    #[error("Target multiple for sector {sector} must be positive, got {multiple}")]
    NonPositiveMultiple {
        /// Offending sector
        sector: String,
        /// Supplied multiple
        multiple: f64,
    },

    /// Growth assumption is NaN or infinite.
    #[error("Growth for sector {sector} must be finite, got {growth}")]
    NonFiniteGrowth {
        /// Offending sector
        sector: String,
        /// Supplied growth
        growth: f64,
    },

    /// Scenario input has no growth entry for a registry sector.
    #[error("Missing growth assumption for sector {0}")]
    MissingGrowth(String),

    /// Scenario input has no target multiple entry for a registry sector.
    #[error("Missing target multiple for sector {0}")]
    MissingTargetMultiple(String),

    /// Global multiple change would take every multiple to zero or below.
    #[error("Multiple change must be above -100%, got {0}")]
    MultipleChangeOutOfRange(f64),

    /// An intermediate or final quantity overflowed to infinity or NaN.
    #[error("Scenario {quantity} is not finite: {value}")]
    NonFiniteResult {
        /// Name of the offending quantity
        quantity: String,
        /// Computed value
        value: f64,
    },

    /// Harmonic denominator vanished (every contributing weight is zero).
    #[error("Weighted harmonic mean is undefined: all contributing weights are zero")]
    DegenerateWeights,
}

/// Lookup of a sector name that the registry does not contain.
///
/// # Examples
/// ```
/// use index_core::types::NotFoundError;
///
/// let err = NotFoundError::new("Crypto");
/// assert_eq!(format!("{}", err), "Sector not found: Crypto");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Sector not found: {0}")]
pub struct NotFoundError(pub String);

impl NotFoundError {
    /// Create a not-found error for the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name that failed to resolve.
    pub fn name(&self) -> &str {
        &self.0
    }
}
