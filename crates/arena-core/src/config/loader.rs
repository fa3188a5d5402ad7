//! Config loader: reads `~/.arena/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.arena/config.json`
//! 3. Environment variables `ARENA_<SECTION>__<FIELD>` (override JSON), plus
//!    each provider's conventional key variable (`GROQ_API_KEY`, ...)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, PlaceholderConfig, ProviderConfig};

/// `(config name, env segment, conventional key variable)` for each real provider.
const PROVIDER_ENV: &[(&str, &str, &str)] = &[
    ("groq", "GROQ", "GROQ_API_KEY"),
    ("gemini", "GEMINI", "GEMINI_API_KEY"),
];

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply process environment overrides on top of a loaded config.
fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_with(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`.
///
/// Supported overrides:
/// - `ARENA_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
///   (falls back to `<NAME>_API_KEY`)
/// - `ARENA_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `ARENA_PROVIDERS__REQUEST_TIMEOUT_SECS` → `providers.request_timeout_secs`
/// - `ARENA_GATEWAY__HOST` → `gateway.host`
/// - `ARENA_GATEWAY__PORT` → `gateway.port`
/// - `ARENA_GATEWAY__REJECT_UNKNOWN_MODELS` → `gateway.reject_unknown_models`
/// - `ARENA_PLACEHOLDER__MIN_LATENCY_SECS` / `__MAX_LATENCY_SECS` / `__SEED`
fn apply_overrides_with<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    for (name, segment, conventional) in PROVIDER_ENV {
        if let Some(provider) = config.providers.get_by_name_mut(name) {
            apply_provider_env(provider, segment, conventional, &lookup);
        }
    }
    if let Some(n) = parse_var::<u64, _>(&lookup, "ARENA_PROVIDERS__REQUEST_TIMEOUT_SECS") {
        config.providers.request_timeout_secs = n;
    }

    // Gateway
    if let Some(val) = lookup("ARENA_GATEWAY__HOST") {
        config.gateway.host = val;
    }
    if let Some(p) = parse_var::<u16, _>(&lookup, "ARENA_GATEWAY__PORT") {
        config.gateway.port = p;
    }
    if let Some(val) = lookup("ARENA_GATEWAY__REJECT_UNKNOWN_MODELS") {
        config.gateway.reject_unknown_models = val == "true" || val == "1";
    }

    // Placeholder backend
    if let Some(v) = parse_latency(&lookup, "ARENA_PLACEHOLDER__MIN_LATENCY_SECS") {
        config.placeholder.min_latency_secs = v;
    }
    if let Some(v) = parse_latency(&lookup, "ARENA_PLACEHOLDER__MAX_LATENCY_SECS") {
        config.placeholder.max_latency_secs = v;
    }
    if let Some(seed) = parse_var::<u64, _>(&lookup, "ARENA_PLACEHOLDER__SEED") {
        config.placeholder.seed = Some(seed);
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env<F>(provider: &mut ProviderConfig, segment: &str, conventional: &str, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let key = lookup(&format!("ARENA_PROVIDERS__{segment}__API_KEY")).or_else(|| {
        if provider.is_configured() {
            None
        } else {
            lookup(conventional)
        }
    });
    if let Some(val) = key {
        provider.api_key = val;
    }
    if let Some(val) = lookup(&format!("ARENA_PROVIDERS__{segment}__API_BASE")) {
        provider.api_base = Some(val);
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = key, value = %raw, "Ignoring unparsable env override");
            None
        }
    }
}

/// Like [`parse_var`], but also drops values outside the placeholder latency range.
fn parse_latency<F>(lookup: &F, key: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let v = parse_var::<f64, _>(lookup, key)?;
    if PlaceholderConfig::is_valid_latency(v) {
        Some(v)
    } else {
        warn!(var = key, value = v, "Ignoring out-of-range latency override");
        None
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
