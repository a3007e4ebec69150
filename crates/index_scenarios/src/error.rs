//! Scenario error types.
//!
//! `compute_scenario` can only fail with a `DomainError`; operations that
//! also look sectors up by name (sweeps, input validation) fail with
//! `ScenarioError`, which carries either case.

use index_core::types::{DomainError, NotFoundError};
use thiserror::Error;

/// Errors from scenario operations that resolve sector names.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    /// Inputs outside the domain of the aggregation formulas.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Sector name absent from the registry.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}
