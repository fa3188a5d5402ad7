//! Model pricing: static per-model price table and cost estimate.
//!
//! Prices are USD per 1M tokens. The comparator only sees a total token
//! count, so the estimate uses the mean of input and output price
//! (an even input/output split).

use serde::Serialize;

/// Input/output price for one model, per 1M tokens.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPrice {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPrice {
    const fn new(input_per_million: f64, output_per_million: f64) -> Self {
        ModelPrice {
            input_per_million,
            output_per_million,
        }
    }

    /// Mean of input and output price.
    pub fn average_per_million(&self) -> f64 {
        (self.input_per_million + self.output_per_million) / 2.0
    }
}

/// Price table keyed by model id.
pub static PRICES: &[(&str, ModelPrice)] = &[
    ("groq-llama", ModelPrice::new(0.59, 0.79)),
    ("groq-mixtral", ModelPrice::new(0.27, 0.27)),
    ("gemini-pro", ModelPrice::new(0.50, 1.50)),
    ("mistral-7b", ModelPrice::new(0.25, 0.25)),
    ("claude-instant", ModelPrice::new(0.80, 2.40)),
    ("claude-2", ModelPrice::new(8.00, 24.00)),
    ("gpt-3.5-turbo", ModelPrice::new(0.50, 1.50)),
    ("gpt-4-turbo", ModelPrice::new(10.00, 30.00)),
    ("cohere-command", ModelPrice::new(1.00, 2.00)),
    ("meta-llama", ModelPrice::new(0.65, 2.75)),
    ("palm-2", ModelPrice::new(0.50, 1.50)),
    ("yi-34b", ModelPrice::new(0.80, 0.80)),
    ("deepseek-coder", ModelPrice::new(0.14, 0.28)),
];

/// Price entry for a model, if it has one.
pub fn price_for(model_id: &str) -> Option<ModelPrice> {
    PRICES
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, price)| *price)
}

/// Estimated USD cost of `token_count` tokens on `model_id`.
///
/// Never fails: unknown models cost 0.
pub fn estimate_cost(model_id: &str, token_count: u32) -> f64 {
    match price_for(model_id) {
        Some(price) => f64::from(token_count) / 1_000_000.0 * price.average_per_million(),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MODELS;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_estimate_known_model() {
        // gpt-4-turbo averages $20 / 1M tokens
        assert!(approx_eq(estimate_cost("gpt-4-turbo", 500_000), 10.0));
        assert!(approx_eq(estimate_cost("groq-llama", 1_000_000), 0.69));
    }

    #[test]
    fn test_estimate_matches_formula_for_every_model() {
        for (id, price) in PRICES {
            let expected = 350.0 / 1e6 * (price.input_per_million + price.output_per_million) / 2.0;
            assert!(approx_eq(estimate_cost(id, 350), expected), "{id}");
        }
    }

    #[test]
    fn test_unknown_model_costs_nothing() {
        assert_eq!(estimate_cost("not-a-model", 10_000), 0.0);
        assert!(price_for("not-a-model").is_none());
    }

    #[test]
    fn test_zero_tokens() {
        assert_eq!(estimate_cost("claude-2", 0), 0.0);
    }

    #[test]
    fn test_every_catalog_model_is_priced() {
        for model in MODELS {
            let price = price_for(model.id).unwrap_or_else(|| panic!("no price for {}", model.id));
            assert!(price.average_per_million() > 0.0);
        }
    }
}
