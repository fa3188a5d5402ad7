//! Configuration schema.
//!
//! Hierarchy: `Config` → `ProvidersConfig`, `GatewayConfig`, `PlaceholderConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration: loaded from `~/.arena/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub providers: ProvidersConfig,
    pub gateway: GatewayConfig,
    pub placeholder: PlaceholderConfig,
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Configuration for a single LLM provider (API key, base URL, headers).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication.
    #[serde(default)]
    pub api_key: String,
    /// Custom API base URL (overrides provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Extra HTTP headers to send with each request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_headers: Option<HashMap<String, String>>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Credentials for every provider that has a real backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub groq: ProviderConfig,
    #[serde(default)]
    pub gemini: ProviderConfig,
    /// Transport timeout for real backend requests, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            groq: ProviderConfig::default(),
            gemini: ProviderConfig::default(),
            request_timeout_secs: 120,
        }
    }
}

impl ProvidersConfig {
    /// Get a provider config by name (e.g. `"groq"`).
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "groq" => Some(&self.groq),
            "gemini" => Some(&self.gemini),
            _ => None,
        }
    }

    /// Mutable variant of [`get_by_name`](Self::get_by_name).
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut ProviderConfig> {
        match name {
            "groq" => Some(&mut self.groq),
            "gemini" => Some(&mut self.gemini),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// Gateway
// ─────────────────────────────────────────────

/// HTTP gateway configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Reject a whole request when any model id is unknown. When false,
    /// unknown ids come back as failed cards instead.
    pub reject_unknown_models: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            reject_unknown_models: true,
        }
    }
}

// ─────────────────────────────────────────────
// Placeholder backend
// ─────────────────────────────────────────────

/// Simulated latency and seeding for models served by the placeholder backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceholderConfig {
    pub min_latency_secs: f64,
    pub max_latency_secs: f64,
    /// Fixed RNG seed; `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            min_latency_secs: 1.0,
            max_latency_secs: 3.0,
            seed: None,
        }
    }
}

/// Longest simulated latency a placeholder will ever sleep.
pub const MAX_PLACEHOLDER_LATENCY_SECS: f64 = 300.0;

impl PlaceholderConfig {
    /// Whether `secs` is usable as a simulated latency as written.
    pub fn is_valid_latency(secs: f64) -> bool {
        secs.is_finite() && (0.0..=MAX_PLACEHOLDER_LATENCY_SECS).contains(&secs)
    }

    /// Latency bounds clamped to `[0, MAX_PLACEHOLDER_LATENCY_SECS]` and ordered.
    ///
    /// A NaN falls back to the default for that side; infinities clamp.
    pub fn latency_bounds(&self) -> (f64, f64) {
        let defaults = PlaceholderConfig::default();
        let clamp = |secs: f64, fallback: f64| {
            if secs.is_nan() {
                fallback
            } else {
                secs.clamp(0.0, MAX_PLACEHOLDER_LATENCY_SECS)
            }
        };
        let lo = clamp(self.min_latency_secs, defaults.min_latency_secs);
        let hi = clamp(self.max_latency_secs, defaults.max_latency_secs);
        if lo <= hi {
            (lo, hi)
        } else {
            (hi, lo)
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
