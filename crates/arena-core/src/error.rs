//! Error taxonomy shared across the workspace.
//!
//! - [`ValidationError`]: the client sent something unusable; the whole
//!   request is rejected before any model is invoked.
//! - [`ProviderError`]: one model's invocation failed; it is contained in
//!   that model's result slot and never reaches sibling branches.

use thiserror::Error;

/// A comparison request that cannot be dispatched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The body was not a JSON object.
    #[error("Request body must be a valid JSON object")]
    InvalidBody,

    #[error("Prompt is required")]
    MissingPrompt,

    #[error("Prompt must be a string")]
    PromptNotText,

    /// Prompt was present but empty after trimming whitespace.
    #[error("Prompt must not be blank")]
    BlankPrompt,

    #[error("Models are required")]
    MissingModels,

    /// `models` was not an array of strings.
    #[error("Models must be a list of model identifiers")]
    ModelsNotList,

    #[error("At least one model must be selected")]
    NoModels,

    #[error("At most {max} models can be compared at once (got {count})")]
    TooManyModels { count: usize, max: usize },

    /// One or more ids are not in the model registry.
    #[error("Unknown model(s): {}", .0.join(", "))]
    UnknownModels(Vec<String>),
}

/// Failure of a single provider invocation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Connection, TLS, or timeout failure before a response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status (auth, rate limit, ...).
    #[error("Provider returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_distinct() {
        let errors = [
            ValidationError::InvalidBody,
            ValidationError::MissingPrompt,
            ValidationError::PromptNotText,
            ValidationError::BlankPrompt,
            ValidationError::MissingModels,
            ValidationError::ModelsNotList,
            ValidationError::NoModels,
            ValidationError::TooManyModels { count: 11, max: 10 },
            ValidationError::UnknownModels(vec!["x".into()]),
        ];
        let mut messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_too_many_models_message() {
        let err = ValidationError::TooManyModels { count: 11, max: 10 };
        assert_eq!(
            err.to_string(),
            "At most 10 models can be compared at once (got 11)"
        );
    }

    #[test]
    fn test_unknown_models_lists_ids() {
        let err = ValidationError::UnknownModels(vec!["foo".into(), "bar".into()]);
        assert_eq!(err.to_string(), "Unknown model(s): foo, bar");
    }

    #[test]
    fn test_provider_error_messages() {
        let err = ProviderError::Api {
            status: 401,
            body: "invalid api key".into(),
        };
        assert_eq!(err.to_string(), "Provider returned 401: invalid api key");
        assert_eq!(
            ProviderError::UnknownModel("gpt-9".into()).to_string(),
            "Unknown model: gpt-9"
        );
    }
}
