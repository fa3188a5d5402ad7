//! Domain types for a side-by-side model comparison.
//!
//! The wire shapes here are what the results grid consumes, so the serde
//! names follow the JSON contract (`modelId`, `speed`, `cost`, ...) rather
//! than the Rust field names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Upper bound on model ids per comparison request.
pub const MAX_MODELS_PER_REQUEST: usize = 10;

// ─────────────────────────────────────────────
// Model descriptor
// ─────────────────────────────────────────────

/// Static identity of one comparable model.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Stable key, e.g. `"groq-llama"`.
    pub id: String,
    /// Human-readable name, e.g. `"Groq Llama 3"`.
    pub display_name: String,
    /// Vendor shown on the result card, e.g. `"Groq"`.
    pub provider_name: String,
}

impl ModelDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        provider_name: impl Into<String>,
    ) -> Self {
        ModelDescriptor {
            id: id.into(),
            display_name: display_name.into(),
            provider_name: provider_name.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Invocation outcome
// ─────────────────────────────────────────────

/// Successful output of one backend call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationOutcome {
    pub text: String,
    /// Total tokens reported (or simulated) for the call.
    pub token_count: u32,
}

impl InvocationOutcome {
    pub fn new(text: impl Into<String>, token_count: u32) -> Self {
        InvocationOutcome {
            text: text.into(),
            token_count,
        }
    }
}

// ─────────────────────────────────────────────
// Comparison request
// ─────────────────────────────────────────────

/// A validated comparison request.
///
/// Can only be built through [`ComparisonRequest::new`] or
/// [`ComparisonRequest::from_json`], so holding one means the prompt is
/// non-blank and there are between 1 and [`MAX_MODELS_PER_REQUEST`] ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonRequest {
    prompt: String,
    model_ids: Vec<String>,
}

impl ComparisonRequest {
    pub fn new(prompt: impl Into<String>, model_ids: Vec<String>) -> Result<Self, ValidationError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(ValidationError::BlankPrompt);
        }
        if model_ids.is_empty() {
            return Err(ValidationError::NoModels);
        }
        if model_ids.len() > MAX_MODELS_PER_REQUEST {
            return Err(ValidationError::TooManyModels {
                count: model_ids.len(),
                max: MAX_MODELS_PER_REQUEST,
            });
        }
        Ok(ComparisonRequest { prompt, model_ids })
    }

    /// Validate an inbound `{prompt, models}` body.
    ///
    /// Checks run in a fixed order (prompt before models) so a body with
    /// several problems always reports the same one.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let body = body.as_object().ok_or(ValidationError::InvalidBody)?;

        let prompt = match body.get("prompt") {
            None | Some(Value::Null) => return Err(ValidationError::MissingPrompt),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(ValidationError::PromptNotText),
        };
        if prompt.trim().is_empty() {
            return Err(ValidationError::BlankPrompt);
        }

        let model_ids = match body.get("models") {
            None | Some(Value::Null) => return Err(ValidationError::MissingModels),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(String::from)
                        .ok_or(ValidationError::ModelsNotList)
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(ValidationError::ModelsNotList),
        };

        Self::new(prompt, model_ids)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn model_ids(&self) -> &[String] {
        &self.model_ids
    }

    /// Prompt length in characters (not bytes).
    pub fn prompt_length(&self) -> usize {
        self.prompt.chars().count()
    }
}

// ─────────────────────────────────────────────
// Comparison result
// ─────────────────────────────────────────────

/// What happened in one branch. Serialized flat into [`ComparisonResult`],
/// so a card carries either `response` + `tokens` or `error`, never both.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BranchOutcome {
    Success { response: String, tokens: u32 },
    Failure { error: String },
}

/// One model's card in the results grid.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub model_id: String,
    pub model_name: String,
    #[serde(rename = "provider")]
    pub provider_name: String,
    #[serde(flatten)]
    pub outcome: BranchOutcome,
    /// Wall time spent in the branch, in seconds.
    #[serde(rename = "speed")]
    pub elapsed_seconds: f64,
    /// Estimated USD cost; always 0 for failed branches.
    #[serde(rename = "cost")]
    pub estimated_cost: f64,
}

impl ComparisonResult {
    pub fn success(
        descriptor: &ModelDescriptor,
        outcome: InvocationOutcome,
        elapsed_seconds: f64,
        estimated_cost: f64,
    ) -> Self {
        ComparisonResult {
            model_id: descriptor.id.clone(),
            model_name: descriptor.display_name.clone(),
            provider_name: descriptor.provider_name.clone(),
            outcome: BranchOutcome::Success {
                response: outcome.text,
                tokens: outcome.token_count,
            },
            elapsed_seconds: elapsed_seconds.max(0.0),
            estimated_cost: estimated_cost.max(0.0),
        }
    }

    pub fn failure(descriptor: &ModelDescriptor, error: impl Into<String>, elapsed_seconds: f64) -> Self {
        ComparisonResult {
            model_id: descriptor.id.clone(),
            model_name: descriptor.display_name.clone(),
            provider_name: descriptor.provider_name.clone(),
            outcome: BranchOutcome::Failure {
                error: error.into(),
            },
            elapsed_seconds: elapsed_seconds.max(0.0),
            estimated_cost: 0.0,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BranchOutcome::Success { .. })
    }

    pub fn response_text(&self) -> Option<&str> {
        match &self.outcome {
            BranchOutcome::Success { response, .. } => Some(response),
            BranchOutcome::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            BranchOutcome::Failure { error } => Some(error),
            BranchOutcome::Success { .. } => None,
        }
    }

    pub fn token_count(&self) -> Option<u32> {
        match self.outcome {
            BranchOutcome::Success { tokens, .. } => Some(tokens),
            BranchOutcome::Failure { .. } => None,
        }
    }
}

// ─────────────────────────────────────────────
// Dispatch response
// ─────────────────────────────────────────────

/// Body returned by the dispatch endpoint (and `arena compare --json`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CompareResponse {
    pub results: Vec<ComparisonResult>,
    /// RFC 3339 time the response was assembled.
    pub timestamp: String,
    pub prompt_length: usize,
}

impl CompareResponse {
    pub fn new(request: &ComparisonRequest, results: Vec<ComparisonResult>) -> Self {
        Self::for_prompt(request.prompt(), results)
    }

    /// Same as [`CompareResponse::new`] when only the prompt text is at hand.
    pub fn for_prompt(prompt: &str, results: Vec<ComparisonResult>) -> Self {
        CompareResponse {
            results,
            timestamp: crate::utils::timestamp(),
            prompt_length: prompt.chars().count(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
