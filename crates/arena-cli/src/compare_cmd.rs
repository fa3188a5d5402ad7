//! `arena compare`: run one comparison in-process.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use arena_core::{CompareResponse, ComparisonResult, ValidationError};

use crate::helpers;

pub async fn run(
    config_path: Option<PathBuf>,
    prompt: String,
    models: Vec<String>,
    json: bool,
) -> Result<()> {
    let config = crate::load(config_path.as_ref());
    let comparator = crate::build_comparator(&config)?;

    if config.gateway.reject_unknown_models {
        let unknown = comparator.unknown_ids(&models);
        if !unknown.is_empty() {
            bail!(ValidationError::UnknownModels(unknown));
        }
    }

    if !json {
        eprint!(
            "{}",
            format!("⠿ asking {} model(s)...", models.len()).dimmed()
        );
    }
    let results = comparator.compare_raw(prompt.as_str(), models).await?;
    let response = CompareResponse::for_prompt(&prompt, results);

    if json {
        let out = serde_json::to_string_pretty(&response).context("failed to encode response")?;
        println!("{out}");
        return Ok(());
    }

    eprint!("\r{}\r", " ".repeat(40));
    println!();
    for result in &response.results {
        println!("{}", helpers::format_card(result));
        println!();
    }

    if let Some(summary) = Summary::of(&response.results) {
        println!(
            "  {} {} ({})",
            "Fastest:".bold(),
            summary.fastest.model_name,
            helpers::format_speed(summary.fastest.elapsed_seconds)
        );
        println!(
            "  {} {} ({})",
            "Cheapest:".bold(),
            summary.cheapest.model_name,
            helpers::format_cost(summary.cheapest.estimated_cost)
        );
        println!();
    }

    Ok(())
}

/// Best successful results of a comparison.
struct Summary<'a> {
    fastest: &'a ComparisonResult,
    cheapest: &'a ComparisonResult,
}

impl<'a> Summary<'a> {
    /// `None` when nothing succeeded.
    fn of(results: &'a [ComparisonResult]) -> Option<Self> {
        let ok = || results.iter().filter(|r| r.is_success());
        let fastest = ok().min_by(|a, b| a.elapsed_seconds.total_cmp(&b.elapsed_seconds))?;
        let cheapest = ok().min_by(|a, b| a.estimated_cost.total_cmp(&b.estimated_cost))?;
        Some(Summary { fastest, cheapest })
    }
}
