//! # index_core: Foundation for Sector-Driven Index Targets
//!
//! ## Layer 1 (Foundation) Role
//!
//! index_core is the bottom layer of the workspace, providing:
//! - Sector and index baseline types: `SectorId`, `SectorRecord`, `IndexBaseline` (`types`)
//! - Error taxonomy: `ConfigurationError`, `DomainError`, `NotFoundError` (`types::error`)
//! - The immutable baseline registry and its reference deployment (`registry`)
//! - Weighted aggregation helpers generic over `Float` (`math`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use index_core::registry::BaselineRegistry;
//!
//! let registry = BaselineRegistry::reference();
//! assert_eq!(registry.len(), 11);
//! assert!((registry.baseline().base_eps() - 311.7486).abs() < 1e-3);
//!
//! let tech = registry.sector("Information Technology").unwrap();
//! assert!(tech.weight() > 0.3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for sector and baseline types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod registry;
pub mod types;

pub use registry::{BaselineRegistry, WeightPolicy};
pub use types::{
    ConfigurationError, DomainError, IndexBaseline, NotFoundError, SectorId, SectorRecord,
};
