//! Router and the dispatch handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use arena_compare::Comparator;
use arena_core::{CompareResponse, ComparisonRequest, ValidationError};

use crate::error::ApiError;
use crate::health;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub comparator: Arc<Comparator>,
    /// Reject the whole request when any id is unknown, instead of
    /// reporting those ids as failed results.
    pub reject_unknown_models: bool,
}

impl AppState {
    pub fn new(comparator: Arc<Comparator>, reject_unknown_models: bool) -> Self {
        AppState {
            comparator,
            reject_unknown_models,
        }
    }
}

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/compare", post(compare))
        .route("/api/health", get(health::health))
        .route("/api/models", get(health::models))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `POST /api/compare`
///
/// The body is read as raw bytes so any content type is accepted and each
/// shape problem gets its own message.
async fn compare(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CompareResponse>, ApiError> {
    let body = body.map_err(body_error)?;

    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejecting unparseable body");
        ValidationError::InvalidBody
    })?;

    let request = ComparisonRequest::from_json(&value).inspect_err(|e| {
        debug!(error = %e, "Rejecting invalid comparison request");
    })?;

    if state.reject_unknown_models {
        let unknown = state.comparator.unknown_ids(request.model_ids());
        if !unknown.is_empty() {
            warn!(unknown = ?unknown, "Rejecting request with unknown models");
            return Err(ValidationError::UnknownModels(unknown).into());
        }
    }

    let results = state.comparator.compare(&request).await;
    Ok(Json(CompareResponse::new(&request, results)))
}

/// Client-side body problems keep their 4xx status; anything else is ours.
fn body_error(rejection: BytesRejection) -> ApiError {
    let status = rejection.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Rejecting oversized request body");
        ApiError::Rejected {
            status,
            message: "Request body is too large".into(),
        }
    } else if status.is_client_error() {
        ApiError::Rejected {
            status,
            message: rejection.body_text(),
        }
    } else {
        ApiError::Internal(rejection.body_text())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    use arena_core::config::Config;
    use arena_core::{InvocationOutcome, ModelDescriptor, ProviderError};
    use arena_providers::{
        BackendKind, ModelRegistry, PlaceholderRng, ProviderBackend, RegisteredModel, MODELS,
    };

    struct CountingBackend(Arc<AtomicUsize>);

    #[async_trait]
    impl ProviderBackend for CountingBackend {
        async fn invoke(&self, prompt: &str) -> Result<InvocationOutcome, ProviderError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(InvocationOutcome::new(format!("echo: {prompt}"), 10))
        }

        fn kind(&self) -> BackendKind {
            BackendKind::Live
        }
    }

    fn catalog_app(reject_unknown_models: bool) -> Router {
        let registry =
            ModelRegistry::from_config_with_rng(&Config::default(), PlaceholderRng::seeded(5)).unwrap();
        router(AppState::new(
            Arc::new(Comparator::new(Arc::new(registry))),
            reject_unknown_models,
        ))
    }

    fn counting_app(calls: &Arc<AtomicUsize>) -> Router {
        let entries = vec![RegisteredModel::new(
            ModelDescriptor::new("echo", "Echo", "Test"),
            Arc::new(CountingBackend(calls.clone())),
        )];
        let registry = ModelRegistry::from_parts(entries, BTreeMap::new());
        router(AppState::new(
            Arc::new(Comparator::new(Arc::new(registry))),
            true,
        ))
    }

    fn post_compare(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/compare")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn expect_400(app: Router, body: Value, message: &str) {
        let (status, json) = send(app, post_compare(body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{json}");
        assert_eq!(json["error"], message);
    }

    // ── Dispatch ──

    #[tokio::test(start_paused = true)]
    async fn test_hello_scenario_without_credentials() {
        let body = json!({"prompt": "Hello", "models": ["groq-llama", "gemini-pro"]});
        let (status, json) = send(catalog_app(true), post_compare(body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["prompt_length"], 5);
        assert!(json["timestamp"].is_string());

        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        for (result, (id, name)) in results
            .iter()
            .zip([("groq-llama", "Groq Llama 3"), ("gemini-pro", "Gemini Pro")])
        {
            assert_eq!(result["modelId"], id);
            assert_eq!(result["modelName"], name);
            let text = result["response"].as_str().unwrap();
            assert!(text.contains("Hello"));
            assert!(text.contains(name));
            assert!(result["speed"].as_f64().unwrap() > 0.0);
            assert!(result["cost"].as_f64().unwrap() > 0.0);
            assert!(result["tokens"].as_u64().is_some());
            assert!(result.get("error").is_none());
        }
    }

    #[tokio::test]
    async fn test_empty_models_rejected_without_invocations() {
        let calls = Arc::new(AtomicUsize::new(0));
        expect_400(
            counting_app(&calls),
            json!({"prompt": "Hi", "models": []}),
            "At least one model must be selected",
        )
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_eleven_models_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        expect_400(
            counting_app(&calls),
            json!({"prompt": "Hi", "models": vec!["echo"; 11]}),
            "At most 10 models can be compared at once (got 11)",
        )
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ten_models_accepted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let body = json!({"prompt": "Hi", "models": vec!["echo"; 10]});
        let (status, json) = send(counting_app(&calls), post_compare(body.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["results"].as_array().unwrap().len(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_prompt_validation_messages() {
        let calls = Arc::new(AtomicUsize::new(0));
        expect_400(counting_app(&calls), json!({"prompt": "  \n\t", "models": ["echo"]}), "Prompt must not be blank").await;
        expect_400(counting_app(&calls), json!({"models": ["echo"]}), "Prompt is required").await;
        expect_400(counting_app(&calls), json!({"prompt": 7, "models": ["echo"]}), "Prompt must be a string").await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_models_validation_messages() {
        let calls = Arc::new(AtomicUsize::new(0));
        expect_400(counting_app(&calls), json!({"prompt": "Hi"}), "Models are required").await;
        expect_400(
            counting_app(&calls),
            json!({"prompt": "Hi", "models": "echo"}),
            "Models must be a list of model identifiers",
        )
        .await;
        expect_400(
            counting_app(&calls),
            json!({"prompt": "Hi", "models": ["echo", 3]}),
            "Models must be a list of model identifiers",
        )
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (status, json) = send(counting_app(&calls), post_compare("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Request body must be a valid JSON object");

        let (status, json) = send(counting_app(&calls), post_compare("[1, 2]")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Request body must be a valid JSON object");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_oversized_body_is_a_client_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let body = json!({"prompt": "a".repeat(3 * 1024 * 1024), "models": ["echo"]});
        let (status, json) = send(counting_app(&calls), post_compare(body.to_string())).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error"], "Request body is too large");
        assert!(json.get("details").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_models_rejected_by_default() {
        let calls = Arc::new(AtomicUsize::new(0));
        expect_400(
            counting_app(&calls),
            json!({"prompt": "Hi", "models": ["echo", "gpt-9", "gpt-9", "llama-7"]}),
            "Unknown model(s): gpt-9, llama-7",
        )
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_models_reported_per_result_when_allowed() {
        let body = json!({"prompt": "Hi", "models": ["gpt-9", "yi-34b"]});
        let (status, json) = send(catalog_app(false), post_compare(body.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        let results = json["results"].as_array().unwrap();
        assert_eq!(results[0]["modelId"], "gpt-9");
        assert_eq!(results[0]["provider"], "unknown");
        assert_eq!(results[0]["error"], "Unknown model: gpt-9");
        assert_eq!(results[0]["cost"], 0.0);
        assert!(results[0].get("tokens").is_none());
        assert!(results[1]["response"].is_string());
    }

    // ── Reads ──

    #[tokio::test]
    async fn test_health_without_credentials() {
        let (status, json) = send(catalog_app(true), get_request("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());

        let features = json["features"].as_object().unwrap();
        assert_eq!(features.len(), 2);
        assert!(features.values().all(|v| v.as_bool() == Some(false)));

        let ids: Vec<&str> = json["supported_models"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        let expected: Vec<&str> = MODELS.iter().map(|m| m.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_models_endpoint_lists_catalog() {
        let (status, json) = send(catalog_app(true), get_request("/api/models")).await;
        assert_eq!(status, StatusCode::OK);

        let models = json["models"].as_array().unwrap();
        assert_eq!(models.len(), MODELS.len());
        assert_eq!(models[0]["id"], MODELS[0].id);
        assert_eq!(models[0]["live"], false);
        assert!(models[0]["inputPricePerMillion"].as_f64().is_some());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = catalog_app(true).oneshot(get_request("/api/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
