//! Comparison orchestrator for Arena.
//!
//! [`Comparator`] fans one prompt out to every requested model at once,
//! contains each model's failure in its own result, and hands back one
//! [`arena_core::ComparisonResult`] per requested id in request order.

pub mod comparator;

pub use comparator::{Comparator, GENERIC_FAILURE_MESSAGE};
