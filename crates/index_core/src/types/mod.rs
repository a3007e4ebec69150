//! Core types for index baselines.
//!
//! This module provides:
//! - `SectorId`: Validated sector identifier
//! - `SectorRecord`: One constituent segment of the index
//! - `IndexBaseline`: Scalar anchors for the whole index
//! - Error types: `ConfigurationError`, `DomainError`, `NotFoundError`

pub mod baseline;
pub mod error;
pub mod sector;

pub use baseline::IndexBaseline;
pub use error::{ConfigurationError, DomainError, NotFoundError};
pub use sector::{SectorId, SectorRecord};
