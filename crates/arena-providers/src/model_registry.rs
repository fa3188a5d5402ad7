//! Model registry: model id → descriptor + the backend chosen for it.
//!
//! Built once at startup from the static [`MODELS`] catalog and the loaded
//! config, then shared read-only (`Arc<ModelRegistry>`). Backend choice is a
//! pure function of config: a model gets its live backend only when the
//! catalog wires one up and that provider's key is configured.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use arena_core::config::Config;
use arena_core::ModelDescriptor;

use crate::catalog::{ModelSpec, MODELS};
use crate::http_provider::{build_http_client, HttpBackend};
use crate::placeholder::{PlaceholderBackend, PlaceholderRng};
use crate::registry::{find_by_name, PROVIDERS};
use crate::traits::{BackendKind, ProviderBackend};

/// A model ready to be invoked.
#[derive(Clone)]
pub struct RegisteredModel {
    pub descriptor: ModelDescriptor,
    pub backend: Arc<dyn ProviderBackend>,
}

impl RegisteredModel {
    pub fn new(descriptor: ModelDescriptor, backend: Arc<dyn ProviderBackend>) -> Self {
        RegisteredModel { descriptor, backend }
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }
}

impl std::fmt::Debug for RegisteredModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredModel")
            .field("id", &self.descriptor.id)
            .field("kind", &self.kind())
            .finish()
    }
}

/// Immutable lookup table of every comparable model.
#[derive(Debug)]
pub struct ModelRegistry {
    models: Vec<RegisteredModel>,
    index: HashMap<String, usize>,
    /// Provider name → credential configured.
    live_providers: BTreeMap<String, bool>,
}

impl ModelRegistry {
    /// Build the registry from config, seeding placeholders per `config.placeholder`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_with_rng(config, PlaceholderRng::from_config(&config.placeholder))
    }

    /// Build the registry from config with an explicit placeholder RNG.
    pub fn from_config_with_rng(config: &Config, rng: PlaceholderRng) -> Result<Self> {
        let live_providers: BTreeMap<String, bool> = PROVIDERS
            .iter()
            .map(|spec| {
                let configured = config
                    .providers
                    .get_by_name(spec.name)
                    .is_some_and(|c| c.is_configured());
                (spec.name.to_string(), configured)
            })
            .collect();

        // Only built when some model actually goes live.
        let mut client: Option<reqwest::Client> = None;

        let mut entries = Vec::with_capacity(MODELS.len());
        for spec in MODELS {
            let backend = match live_backend(spec, config, &mut client)? {
                Some(live) => live,
                None => Arc::new(PlaceholderBackend::new(
                    spec.display_name,
                    &config.placeholder,
                    rng.clone(),
                )) as Arc<dyn ProviderBackend>,
            };
            debug!(model = spec.id, kind = backend.kind().as_str(), "Registered model");
            entries.push(RegisteredModel::new(spec.descriptor(), backend));
        }

        let registry = Self::from_parts(entries, live_providers);
        info!(
            models = registry.len(),
            live = registry
                .models
                .iter()
                .filter(|m| m.kind() == BackendKind::Live)
                .count(),
            "Model registry ready"
        );
        Ok(registry)
    }

    /// Assemble a registry from prepared entries. Later duplicates of an id are dropped.
    pub fn from_parts(entries: Vec<RegisteredModel>, live_providers: BTreeMap<String, bool>) -> Self {
        let mut models = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());
        for entry in entries {
            if index.contains_key(&entry.descriptor.id) {
                warn!(model = %entry.descriptor.id, "Duplicate model id, keeping the first");
                continue;
            }
            index.insert(entry.descriptor.id.clone(), models.len());
            models.push(entry);
        }
        ModelRegistry {
            models,
            index,
            live_providers,
        }
    }

    pub fn lookup(&self, model_id: &str) -> Option<&RegisteredModel> {
        self.index.get(model_id).map(|&i| &self.models[i])
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.index.contains_key(model_id)
    }

    /// All model ids in catalog order.
    pub fn supported_ids(&self) -> Vec<String> {
        self.models.iter().map(|m| m.descriptor.id.clone()).collect()
    }

    pub fn models(&self) -> &[RegisteredModel] {
        &self.models
    }

    pub fn live_providers(&self) -> &BTreeMap<String, bool> {
        &self.live_providers
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// The live backend for `spec`, if it has wiring and a configured key.
fn live_backend(
    spec: &ModelSpec,
    config: &Config,
    client: &mut Option<reqwest::Client>,
) -> Result<Option<Arc<dyn ProviderBackend>>> {
    let Some(route) = &spec.live else {
        return Ok(None);
    };
    let Some(provider) = find_by_name(route.provider) else {
        warn!(model = spec.id, provider = route.provider, "Live route names an unknown provider");
        return Ok(None);
    };
    let Some(provider_config) = config
        .providers
        .get_by_name(provider.name)
        .filter(|c| c.is_configured())
    else {
        return Ok(None);
    };

    let client = match client.as_ref() {
        Some(c) => c.clone(),
        None => {
            let built = build_http_client(config.providers.request_timeout_secs)
                .context("failed to build HTTP client")?;
            *client = Some(built.clone());
            built
        }
    };

    Ok(Some(Arc::new(HttpBackend::new(
        client,
        provider_config,
        provider,
        route.upstream_model,
    ))))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(config: &Config) -> ModelRegistry {
        ModelRegistry::from_config_with_rng(config, PlaceholderRng::seeded(1)).unwrap()
    }

    #[test]
    fn test_no_credentials_everything_placeholder() {
        let reg = registry(&Config::default());
        assert_eq!(reg.len(), MODELS.len());
        assert!(reg.models().iter().all(|m| m.kind() == BackendKind::Placeholder));
        assert!(reg.live_providers().values().all(|live| !live));
        assert_eq!(reg.live_providers().len(), PROVIDERS.len());
    }

    #[test]
    fn test_groq_key_makes_groq_models_live() {
        let mut config = Config::default();
        config.providers.groq.api_key = "gsk_test".into();
        let reg = registry(&config);

        assert_eq!(reg.lookup("groq-llama").unwrap().kind(), BackendKind::Live);
        assert_eq!(reg.lookup("groq-mixtral").unwrap().kind(), BackendKind::Live);
        assert_eq!(reg.lookup("gemini-pro").unwrap().kind(), BackendKind::Placeholder);
        assert_eq!(reg.lookup("gpt-4-turbo").unwrap().kind(), BackendKind::Placeholder);
        assert_eq!(reg.live_providers().get("groq"), Some(&true));
        assert_eq!(reg.live_providers().get("gemini"), Some(&false));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let mut config = Config::default();
        config.providers.gemini.api_key = "g".into();
        let a: Vec<BackendKind> = registry(&config).models().iter().map(|m| m.kind()).collect();
        let b: Vec<BackendKind> = registry(&config).models().iter().map(|m| m.kind()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_lookup() {
        let reg = registry(&Config::default());
        let model = reg.lookup("claude-2").unwrap();
        assert_eq!(model.descriptor.display_name, "Claude 2");
        assert_eq!(model.descriptor.provider_name, "Anthropic");
        assert!(reg.lookup("gpt-9").is_none());
        assert!(!reg.contains("gpt-9"));
    }

    #[test]
    fn test_supported_ids_in_catalog_order_without_duplicates() {
        let reg = registry(&Config::default());
        let ids = reg.supported_ids();
        let expected: Vec<String> = MODELS.iter().map(|m| m.id.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_from_parts_drops_duplicates() {
        let backend: Arc<dyn ProviderBackend> = Arc::new(PlaceholderBackend::new(
            "A",
            &Default::default(),
            PlaceholderRng::seeded(0),
        ));
        let entries = vec![
            RegisteredModel::new(ModelDescriptor::new("a", "First", "P"), backend.clone()),
            RegisteredModel::new(ModelDescriptor::new("a", "Second", "P"), backend),
        ];
        let reg = ModelRegistry::from_parts(entries, BTreeMap::new());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.lookup("a").unwrap().descriptor.display_name, "First");
    }
}
