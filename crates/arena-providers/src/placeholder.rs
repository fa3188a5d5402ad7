//! Placeholder backend: simulated answers for models without live wiring.
//!
//! Latency, token count, and nothing else are random. The randomness source
//! is a shared, seedable [`PlaceholderRng`] so tests (and demos with
//! `placeholder.seed` set) are reproducible.

use std::ops::Range;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use arena_core::config::PlaceholderConfig;
use arena_core::utils::char_prefix;
use arena_core::{InvocationOutcome, ProviderError};

use crate::traits::{BackendKind, ProviderBackend};

/// Characters of the prompt echoed back in the simulated answer.
pub const PROMPT_ECHO_CHARS: usize = 50;

/// Simulated token counts are drawn from this range.
pub const TOKEN_RANGE: Range<u32> = 200..500;

// ─────────────────────────────────────────────
// PlaceholderRng
// ─────────────────────────────────────────────

/// Shared random source for all placeholder backends.
#[derive(Clone, Debug)]
pub struct PlaceholderRng(Arc<Mutex<StdRng>>);

impl PlaceholderRng {
    pub fn seeded(seed: u64) -> Self {
        PlaceholderRng(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))))
    }

    pub fn from_entropy() -> Self {
        PlaceholderRng(Arc::new(Mutex::new(StdRng::from_entropy())))
    }

    pub fn from_config(config: &PlaceholderConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Draw a latency and a token count in one lock.
    fn draw(&self, latency: (f64, f64)) -> (Duration, u32) {
        let mut rng = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let (lo, hi) = latency;
        let secs = if hi > lo { rng.gen_range(lo..hi) } else { lo };
        let tokens = rng.gen_range(TOKEN_RANGE);
        (Duration::from_secs_f64(secs), tokens)
    }
}

// ─────────────────────────────────────────────
// PlaceholderBackend
// ─────────────────────────────────────────────

/// Stand-in for a model that has no live backend (or no credential).
#[derive(Debug)]
pub struct PlaceholderBackend {
    display_name: String,
    latency: (f64, f64),
    rng: PlaceholderRng,
}

impl PlaceholderBackend {
    pub fn new(display_name: impl Into<String>, config: &PlaceholderConfig, rng: PlaceholderRng) -> Self {
        PlaceholderBackend {
            display_name: display_name.into(),
            latency: config.latency_bounds(),
            rng,
        }
    }

    fn render(&self, prompt: &str) -> String {
        let excerpt = char_prefix(prompt, PROMPT_ECHO_CHARS);
        let ellipsis = if excerpt.len() < prompt.len() { "..." } else { "" };
        format!(
            "This is a simulated response from {name}. You asked: \"{excerpt}{ellipsis}\". \
             Configure an API key for this provider to get a live answer.",
            name = self.display_name,
        )
    }
}

#[async_trait]
impl ProviderBackend for PlaceholderBackend {
    async fn invoke(&self, prompt: &str) -> Result<InvocationOutcome, ProviderError> {
        let (delay, tokens) = self.rng.draw(self.latency);
        debug!(
            model = %self.display_name,
            delay_ms = delay.as_millis() as u64,
            tokens,
            "Simulating model response"
        );
        tokio::time::sleep(delay).await;
        Ok(InvocationOutcome::new(self.render(prompt), tokens))
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Placeholder
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
