//! Live backend for OpenAI-compatible `/chat/completions` APIs.
//!
//! Covers Groq and Gemini (through Google's OpenAI-compatible endpoint).
//! One `reqwest::Client` is built at startup by [`build_http_client`] and
//! cloned into every backend, so all live calls share one connection pool.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use arena_core::config::ProviderConfig;
use arena_core::{InvocationOutcome, ProviderError};

use crate::registry::ProviderSpec;
use crate::traits::{BackendKind, ProviderBackend};

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    total_tokens: u32,
}

// ─────────────────────────────────────────────
// Shared client
// ─────────────────────────────────────────────

/// Build the process-wide HTTP client used by every live backend.
pub fn build_http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
}

// ─────────────────────────────────────────────
// HttpBackend
// ─────────────────────────────────────────────

/// A live backend bound to one upstream model on one provider.
pub struct HttpBackend {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.groq.com/openai/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Model name sent upstream.
    upstream_model: String,
    /// Extra headers to send with each request.
    extra_headers: HeaderMap,
    spec: &'static ProviderSpec,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("api_base", &self.api_base)
            .field("upstream_model", &self.upstream_model)
            .field("provider", &self.spec.display_name)
            .finish()
    }
}

impl HttpBackend {
    /// Create a backend from a provider config and spec.
    ///
    /// API base resolution: config > provider default.
    pub fn new(
        client: reqwest::Client,
        config: &ProviderConfig,
        spec: &'static ProviderSpec,
        upstream_model: &str,
    ) -> Self {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| spec.default_api_base.to_string());

        let mut extra_headers = HeaderMap::new();
        if let Some(ref headers) = config.extra_headers {
            for (key, value) in headers {
                if let (Ok(name), Ok(val)) = (
                    HeaderName::from_bytes(key.as_bytes()),
                    HeaderValue::from_str(value),
                ) {
                    extra_headers.insert(name, val);
                } else {
                    warn!(provider = spec.display_name, header = %key, "Invalid header, skipping");
                }
            }
        }

        HttpBackend {
            client,
            api_base,
            api_key: config.api_key.clone(),
            upstream_model: upstream_model.to_string(),
            extra_headers,
            spec,
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl ProviderBackend for HttpBackend {
    async fn invoke(&self, prompt: &str) -> Result<InvocationOutcome, ProviderError> {
        debug!(
            provider = self.spec.display_name,
            model = %self.upstream_model,
            prompt_chars = prompt.chars().count(),
            "Calling LLM"
        );

        let body = ChatCompletionRequest {
            model: &self.upstream_model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .headers(self.extra_headers.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.spec.display_name, error = %e, "HTTP request failed");
                ProviderError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = self.spec.display_name,
                status = %status,
                body = %error_text,
                "API error"
            );
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(provider = self.spec.display_name, error = %e, "Failed to parse LLM response");
            ProviderError::MalformedResponse(e.to_string())
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::MalformedResponse("no message content in response".into()))?;

        // Providers that omit usage are billed as zero.
        let token_count = parsed.usage.map_or(0, |u| u.total_tokens);

        debug!(
            provider = self.spec.display_name,
            model = %self.upstream_model,
            tokens = token_count,
            "LLM response received"
        );

        Ok(InvocationOutcome::new(text, token_count))
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Live
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
