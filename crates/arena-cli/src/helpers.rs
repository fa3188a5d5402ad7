//! Shared CLI helpers: path expansion, banner, result card formatting.

use std::path::PathBuf;

use colored::Colorize;

use arena_core::utils::truncate_string;
use arena_core::ComparisonResult;

/// Longest response text printed on a card before it is cut.
const CARD_TEXT_LIMIT: usize = 600;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!("{}  v{}", "⚖️  Arena".cyan().bold(), version.dimmed());
}

/// `live` / `placeholder` label for a provider or model.
pub fn mode_label(live: bool) -> String {
    if live {
        format!("{} live", "✓".green())
    } else {
        format!("{}", "· placeholder".dimmed())
    }
}

pub fn format_cost(cost: f64) -> String {
    format!("${cost:.6}")
}

pub fn format_speed(seconds: f64) -> String {
    format!("{seconds:.2}s")
}

/// Render one result as a terminal card.
pub fn format_card(result: &ComparisonResult) -> String {
    let header = format!(
        "{} {}",
        result.model_name.bold(),
        format!("({})", result.provider_name).dimmed()
    );

    let mut stats = vec![format!("⏱ {}", format_speed(result.elapsed_seconds))];
    if let Some(tokens) = result.token_count() {
        stats.push(format!("{tokens} tokens"));
    }
    stats.push(format_cost(result.estimated_cost));

    let body = match (result.response_text(), result.error_message()) {
        (Some(text), _) => truncate_string(text, CARD_TEXT_LIMIT),
        (None, Some(error)) => format!("{} {}", "✗".red(), error.red()),
        (None, None) => String::new(),
    };

    format!(
        "{header}\n  {}\n\n{body}\n{}",
        stats.join(" · ").dimmed(),
        "─".repeat(40).dimmed()
    )
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
