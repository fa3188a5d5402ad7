//! Provider backend trait: the seam between the comparator and any LLM.

use async_trait::async_trait;

use arena_core::{InvocationOutcome, ProviderError};

/// Whether a backend reaches a real provider or simulates one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Live,
    Placeholder,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Live => "live",
            BackendKind::Placeholder => "placeholder",
        }
    }
}

/// Trait every model backend implements.
///
/// A backend is bound to one model at construction, so `invoke` only needs
/// the prompt. Implementations must be cheap to share: the registry hands
/// out `Arc<dyn ProviderBackend>` to concurrently running comparisons.
#[async_trait]
pub trait ProviderBackend: Send + Sync {
    /// Send `prompt` and return the generated text plus total token usage.
    async fn invoke(&self, prompt: &str) -> Result<InvocationOutcome, ProviderError>;

    fn kind(&self) -> BackendKind;
}
