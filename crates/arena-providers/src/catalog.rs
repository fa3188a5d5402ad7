//! Static catalog of comparable models.
//!
//! Adding a model means adding a `ModelSpec` here (and a row in
//! [`crate::pricing::PRICES`]) and redeploying; nothing mutates the catalog
//! at runtime.

use arena_core::ModelDescriptor;

/// Live wiring for a catalog entry.
#[derive(Clone, Debug)]
pub struct LiveRoute {
    /// Name of a [`crate::registry::ProviderSpec`].
    pub provider: &'static str,
    /// Model name sent upstream.
    pub upstream_model: &'static str,
}

/// One comparable model.
#[derive(Clone, Debug)]
pub struct ModelSpec {
    pub id: &'static str,
    pub display_name: &'static str,
    pub provider_name: &'static str,
    /// `Some` when a live backend exists for this model.
    pub live: Option<LiveRoute>,
}

impl ModelSpec {
    pub fn descriptor(&self) -> ModelDescriptor {
        ModelDescriptor::new(self.id, self.display_name, self.provider_name)
    }
}

/// Every model the comparator knows about, in display order.
pub static MODELS: &[ModelSpec] = &[
    ModelSpec {
        id: "groq-llama",
        display_name: "Groq Llama 3",
        provider_name: "Groq",
        live: Some(LiveRoute {
            provider: "groq",
            upstream_model: "llama-3.3-70b-versatile",
        }),
    },
    ModelSpec {
        id: "groq-mixtral",
        display_name: "Groq Mixtral 8x7B",
        provider_name: "Groq",
        live: Some(LiveRoute {
            provider: "groq",
            upstream_model: "mixtral-8x7b-32768",
        }),
    },
    ModelSpec {
        id: "gemini-pro",
        display_name: "Gemini Pro",
        provider_name: "Google",
        live: Some(LiveRoute {
            provider: "gemini",
            upstream_model: "gemini-1.5-pro",
        }),
    },
    ModelSpec {
        id: "mistral-7b",
        display_name: "Mistral 7B",
        provider_name: "Mistral",
        live: None,
    },
    ModelSpec {
        id: "claude-instant",
        display_name: "Claude Instant",
        provider_name: "Anthropic",
        live: None,
    },
    ModelSpec {
        id: "claude-2",
        display_name: "Claude 2",
        provider_name: "Anthropic",
        live: None,
    },
    ModelSpec {
        id: "gpt-3.5-turbo",
        display_name: "GPT-3.5 Turbo",
        provider_name: "OpenAI",
        live: None,
    },
    ModelSpec {
        id: "gpt-4-turbo",
        display_name: "GPT-4 Turbo",
        provider_name: "OpenAI",
        live: None,
    },
    ModelSpec {
        id: "cohere-command",
        display_name: "Cohere Command",
        provider_name: "Cohere",
        live: None,
    },
    ModelSpec {
        id: "meta-llama",
        display_name: "Meta Llama 2 70B",
        provider_name: "Meta",
        live: None,
    },
    ModelSpec {
        id: "palm-2",
        display_name: "PaLM 2",
        provider_name: "Google",
        live: None,
    },
    ModelSpec {
        id: "yi-34b",
        display_name: "Yi 34B",
        provider_name: "01.AI",
        live: None,
    },
    ModelSpec {
        id: "deepseek-coder",
        display_name: "DeepSeek Coder",
        provider_name: "DeepSeek",
        live: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_by_name;

    fn find_model(id: &str) -> Option<&'static ModelSpec> {
        MODELS.iter().find(|m| m.id == id)
    }

    #[test]
    fn test_catalog_covers_required_models() {
        for id in [
            "groq-llama",
            "groq-mixtral",
            "gemini-pro",
            "mistral-7b",
            "claude-instant",
            "claude-2",
            "gpt-3.5-turbo",
            "gpt-4-turbo",
            "cohere-command",
            "meta-llama",
            "palm-2",
            "yi-34b",
            "deepseek-coder",
        ] {
            assert!(find_model(id).is_some(), "missing {id}");
        }
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<&str> = MODELS.iter().map(|m| m.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_live_routes_point_at_known_providers() {
        for model in MODELS {
            if let Some(route) = &model.live {
                assert!(find_by_name(route.provider).is_some(), "{}", model.id);
            }
        }
    }

    #[test]
    fn test_descriptor() {
        let d = find_model("gemini-pro").unwrap().descriptor();
        assert_eq!(d.id, "gemini-pro");
        assert_eq!(d.display_name, "Gemini Pro");
        assert_eq!(d.provider_name, "Google");
    }
}
