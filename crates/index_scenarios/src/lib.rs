//! # Index Scenarios (L2: Application)
//!
//! Projects an index price target from sector-level growth and valuation
//! assumptions.
//!
//! This crate provides:
//! - Input resolution from global or per-sector assumptions (`resolve`)
//! - The scenario engine: weighted growth, harmonic-mean multiple, price
//!   target and implied return (`engine`)
//! - Sensitivity sweeps over one sector's target multiple (`sweep`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          index_scenarios (L2)           │
//! ├─────────────────────────────────────────┤
//! │  resolve/  - Global / per-sector modes  │
//! │  engine/   - compute_scenario           │
//! │  sweep/    - SensitivitySweep           │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            index_core (L1)              │
//! │  Registry, types, errors, aggregation   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Every evaluation is a pure function of the registry and one input; no
//! state is kept between evaluations.
//!
//! ## Example
//!
//! ```
//! use index_core::registry::BaselineRegistry;
//! use index_scenarios::{compute_scenario, resolve_inputs, sweep, GlobalAssumptions};
//!
//! let registry = BaselineRegistry::reference();
//! let input = resolve_inputs(&registry, &GlobalAssumptions::new(0.08, 0.0).into());
//!
//! let result = compute_scenario(&registry, &input).unwrap();
//! assert!((result.index_eps_forecast - 336.69).abs() < 0.01);
//! assert!(result.implied_return > 0.10 && result.implied_return < 0.11);
//!
//! let curve = sweep(&registry, &input, "Energy", 20..44).unwrap();
//! assert_eq!(curve.points().count(), 24);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod error;
pub mod input;
pub mod resolve;
pub mod sweep;

// Re-export commonly used types
pub use engine::{compute_scenario, ScenarioEngine, ScenarioResult, SectorContribution};
pub use error::ScenarioError;
pub use input::ScenarioInput;
pub use resolve::{resolve_inputs, AssumptionMode, GlobalAssumptions, PerSectorAssumptions};
pub use sweep::{sweep, SensitivitySweep, SweepPoint, SweepPoints, DEFAULT_SWEEP_RANGE};
