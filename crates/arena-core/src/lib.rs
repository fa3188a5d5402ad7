//! Core crate for Arena: shared types, error taxonomy, configuration, and utilities.
//!
//! Every other crate in the workspace depends on this one:
//! - [`types`]: comparison request/result types and the model descriptor
//! - [`error`]: validation and per-provider error enums
//! - [`config`]: JSON config schema, loader and env var overrides
//! - [`utils`]: data paths, timestamps, string helpers

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use error::{ProviderError, ValidationError};
pub use types::{
    BranchOutcome, CompareResponse, ComparisonRequest, ComparisonResult, InvocationOutcome,
    ModelDescriptor, MAX_MODELS_PER_REQUEST,
};
