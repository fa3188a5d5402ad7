//! Provider registry: static specs for providers with a live backend.
//!
//! Each `ProviderSpec` describes how to reach one OpenAI-compatible
//! endpoint: where the key comes from, the default base URL, and the name
//! used in config and in the capability report.

// ─────────────────────────────────────────────
// ProviderSpec: static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one live LLM provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Internal name, also the config key and capability feature name (e.g. `"groq"`).
    pub name: &'static str,
    /// Environment variable for the API key. E.g. `"GROQ_API_KEY"`.
    pub env_key: &'static str,
    /// Human-readable name for logs. E.g. `"Groq"`.
    pub display_name: &'static str,
    /// OpenAI-compatible API base used when config has no `apiBase`.
    pub default_api_base: &'static str,
}

/// Every provider with live wiring, in report order.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "groq",
        env_key: "GROQ_API_KEY",
        display_name: "Groq",
        default_api_base: "https://api.groq.com/openai/v1",
    },
    // Gemini through Google's OpenAI-compatible surface
    ProviderSpec {
        name: "gemini",
        env_key: "GEMINI_API_KEY",
        display_name: "Gemini",
        default_api_base: "https://generativelanguage.googleapis.com/v1beta/openai",
    },
];

// ─────────────────────────────────────────────
// Matching functions
// ─────────────────────────────────────────────

/// Find a provider spec by exact name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.name == name)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
