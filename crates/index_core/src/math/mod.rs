//! Mathematical utilities for index aggregation.
//!
//! This module provides:
//! - Weighted (additive) sums of per-sector values
//! - Weighted harmonic means of per-sector ratios
//!
//! All functions are generic over `num_traits::Float`.

pub mod aggregation;

pub use aggregation::{harmonic_denominator, weighted_harmonic_mean, weighted_sum};
