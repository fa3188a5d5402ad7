//! Provider layer for Arena.
//!
//! # Architecture
//!
//! - [`traits::ProviderBackend`]: one method: send a prompt, get text + tokens or fail
//! - [`http_provider::HttpBackend`]: live OpenAI-compatible client (Groq, Gemini)
//! - [`placeholder::PlaceholderBackend`]: simulated answers for everything else
//! - [`registry`]: static specs for the providers that have live wiring
//! - [`catalog`]: static list of comparable models
//! - [`pricing`]: per-model price table and cost estimate
//! - [`model_registry::ModelRegistry`]: model id → descriptor + chosen backend

pub mod catalog;
pub mod http_provider;
pub mod model_registry;
pub mod placeholder;
pub mod pricing;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use catalog::{ModelSpec, MODELS};
pub use http_provider::{build_http_client, HttpBackend};
pub use model_registry::{ModelRegistry, RegisteredModel};
pub use placeholder::{PlaceholderBackend, PlaceholderRng};
pub use pricing::{estimate_cost, price_for, ModelPrice};
pub use registry::{ProviderSpec, PROVIDERS};
pub use traits::{BackendKind, ProviderBackend};
