//! The fan-out core: one prompt, many models, one ordered result list.
//!
//! Every requested id runs in its own Tokio task. The comparator waits for
//! all of them (a full join, never a race), so a slow or failing model only
//! affects its own card. Results are collected by position, so completion
//! order never leaks into output order.

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::Instant;
use tracing::{error, info, warn};

use arena_core::{
    ComparisonRequest, ComparisonResult, ModelDescriptor, ProviderError, ValidationError,
};
use arena_providers::{estimate_cost, ModelRegistry};

/// Error text for a branch that died without producing an error of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch response";

/// Provider name reported for ids missing from the registry.
const UNKNOWN_PROVIDER: &str = "unknown";

/// Runs comparisons against a shared, immutable [`ModelRegistry`].
#[derive(Clone, Debug)]
pub struct Comparator {
    registry: Arc<ModelRegistry>,
}

impl Comparator {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Comparator { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Requested ids the registry doesn't know, first occurrence order, no repeats.
    pub fn unknown_ids(&self, model_ids: &[String]) -> Vec<String> {
        let mut unknown: Vec<String> = Vec::new();
        for id in model_ids {
            if !self.registry.contains(id) && !unknown.contains(id) {
                unknown.push(id.clone());
            }
        }
        unknown
    }

    /// Validate then compare. Nothing is dispatched if validation fails.
    pub async fn compare_raw(
        &self,
        prompt: impl Into<String>,
        model_ids: Vec<String>,
    ) -> Result<Vec<ComparisonResult>, ValidationError> {
        let request = ComparisonRequest::new(prompt, model_ids)?;
        Ok(self.compare(&request).await)
    }

    /// Invoke every requested model concurrently.
    ///
    /// Always returns exactly one result per requested id, in request order.
    /// Unknown ids and provider failures become failed results; they never
    /// cancel or fail sibling branches.
    pub async fn compare(&self, request: &ComparisonRequest) -> Vec<ComparisonResult> {
        let batch_start = Instant::now();
        let prompt: Arc<str> = Arc::from(request.prompt());

        info!(
            models = request.model_ids().len(),
            prompt_chars = request.prompt_length(),
            "Starting comparison"
        );

        let handles: Vec<_> = request
            .model_ids()
            .iter()
            .map(|id| {
                tokio::spawn(run_branch(
                    self.registry.clone(),
                    id.clone(),
                    prompt.clone(),
                ))
            })
            .collect();

        let joined = join_all(handles).await;

        let results: Vec<ComparisonResult> = joined
            .into_iter()
            .zip(request.model_ids())
            .map(|(joined, id)| match joined {
                Ok(result) => result,
                Err(e) => {
                    error!(model = %id, error = %e, "Comparison branch died");
                    ComparisonResult::failure(
                        &self.descriptor_for(id),
                        GENERIC_FAILURE_MESSAGE,
                        batch_start.elapsed().as_secs_f64(),
                    )
                }
            })
            .collect();

        info!(
            models = results.len(),
            succeeded = results.iter().filter(|r| r.is_success()).count(),
            elapsed_ms = batch_start.elapsed().as_millis() as u64,
            "Comparison finished"
        );

        results
    }

    fn descriptor_for(&self, model_id: &str) -> ModelDescriptor {
        self.registry
            .lookup(model_id)
            .map(|m| m.descriptor.clone())
            .unwrap_or_else(|| unknown_descriptor(model_id))
    }
}

/// Descriptor for an id the registry doesn't know: the raw id doubles as the name.
fn unknown_descriptor(model_id: &str) -> ModelDescriptor {
    ModelDescriptor::new(model_id, model_id, UNKNOWN_PROVIDER)
}

/// One model's branch: resolve, invoke, time, price.
async fn run_branch(registry: Arc<ModelRegistry>, model_id: String, prompt: Arc<str>) -> ComparisonResult {
    let start = Instant::now();

    let Some(model) = registry.lookup(&model_id) else {
        warn!(model = %model_id, "Unknown model requested");
        let err = ProviderError::UnknownModel(model_id.clone());
        return ComparisonResult::failure(
            &unknown_descriptor(&model_id),
            err.to_string(),
            start.elapsed().as_secs_f64(),
        );
    };

    let outcome = model.backend.invoke(&prompt).await;
    let elapsed = start.elapsed().as_secs_f64();

    match outcome {
        Ok(outcome) => {
            let cost = estimate_cost(&model_id, outcome.token_count);
            info!(
                model = %model_id,
                kind = model.kind().as_str(),
                elapsed_secs = elapsed,
                tokens = outcome.token_count,
                cost,
                "Model responded"
            );
            ComparisonResult::success(&model.descriptor, outcome, elapsed, cost)
        }
        Err(e) => {
            warn!(model = %model_id, elapsed_secs = elapsed, error = %e, "Model failed");
            let message = e.to_string();
            let message = if message.trim().is_empty() {
                GENERIC_FAILURE_MESSAGE.to_string()
            } else {
                message
            };
            ComparisonResult::failure(&model.descriptor, message, elapsed)
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
