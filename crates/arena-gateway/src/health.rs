//! Capability report and model catalog endpoints.
//!
//! Both are pure reads of the registry built at startup; neither touches a
//! provider.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use arena_providers::{price_for, BackendKind, ModelRegistry};

use crate::routes::AppState;

/// `GET /api/health` body.
#[derive(Debug, Serialize, PartialEq)]
pub struct CapabilityReport {
    pub status: &'static str,
    pub version: &'static str,
    /// Provider name → credential configured.
    pub features: BTreeMap<String, bool>,
    pub supported_models: Vec<String>,
}

impl CapabilityReport {
    pub fn from_registry(registry: &ModelRegistry) -> Self {
        CapabilityReport {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            features: registry.live_providers().clone(),
            supported_models: registry.supported_ids(),
        }
    }
}

/// One selectable tile.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub live: bool,
    pub input_price_per_million: Option<f64>,
    pub output_price_per_million: Option<f64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ModelCatalog {
    pub models: Vec<ModelEntry>,
}

impl ModelCatalog {
    pub fn from_registry(registry: &ModelRegistry) -> Self {
        let models = registry
            .models()
            .iter()
            .map(|m| {
                let price = price_for(&m.descriptor.id);
                ModelEntry {
                    id: m.descriptor.id.clone(),
                    name: m.descriptor.display_name.clone(),
                    provider: m.descriptor.provider_name.clone(),
                    live: m.kind() == BackendKind::Live,
                    input_price_per_million: price.map(|p| p.input_per_million),
                    output_price_per_million: price.map(|p| p.output_per_million),
                }
            })
            .collect();
        ModelCatalog { models }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<CapabilityReport> {
    Json(CapabilityReport::from_registry(state.comparator.registry()))
}

pub async fn models(State(state): State<AppState>) -> Json<ModelCatalog> {
    Json(ModelCatalog::from_registry(state.comparator.registry()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::config::Config;
    use arena_providers::{PlaceholderRng, MODELS};

    fn registry(config: &Config) -> ModelRegistry {
        ModelRegistry::from_config_with_rng(config, PlaceholderRng::seeded(0)).unwrap()
    }

    #[test]
    fn test_report_without_credentials() {
        let report = CapabilityReport::from_registry(&registry(&Config::default()));
        assert_eq!(report.status, "ok");
        assert!(!report.features.is_empty());
        assert!(report.features.values().all(|live| !live));
        assert_eq!(report.supported_models.len(), MODELS.len());
    }

    #[test]
    fn test_report_reflects_configured_key() {
        let mut config = Config::default();
        config.providers.gemini.api_key = "AIza-test".into();
        let report = CapabilityReport::from_registry(&registry(&config));
        assert_eq!(report.features.get("gemini"), Some(&true));
        assert_eq!(report.features.get("groq"), Some(&false));
    }

    #[test]
    fn test_catalog_marks_live_models_and_prices() {
        let mut config = Config::default();
        config.providers.groq.api_key = "gsk".into();
        let catalog = ModelCatalog::from_registry(&registry(&config));

        let llama = catalog.models.iter().find(|m| m.id == "groq-llama").unwrap();
        assert!(llama.live);
        assert_eq!(llama.name, "Groq Llama 3");
        assert_eq!(llama.input_price_per_million, Some(0.59));
        assert_eq!(llama.output_price_per_million, Some(0.79));

        let claude = catalog.models.iter().find(|m| m.id == "claude-2").unwrap();
        assert!(!claude.live);

        let json = serde_json::to_value(&catalog).unwrap();
        assert!(json["models"][0].get("inputPricePerMillion").is_some());
    }
}
