//! `arena status`: show configuration and provider status.
//!
//! - Config path and whether it exists
//! - Gateway address and unknown-model policy
//! - Credential state and API base for each real provider

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use arena_core::config::get_config_path;
use arena_providers::PROVIDERS;

pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    let config = crate::load(config_path.as_ref());
    let path = config_path.unwrap_or_else(get_config_path);

    println!();
    println!("{}", "⚖️  Arena Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        path.display(),
        if path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    println!(
        "  {:<18} http://{}:{}",
        "Gateway:".bold(),
        config.gateway.host,
        config.gateway.port
    );
    println!(
        "  {:<18} {}",
        "Unknown models:".bold(),
        if config.gateway.reject_unknown_models {
            "reject request"
        } else {
            "report per result"
        }
    );

    let (lo, hi) = config.placeholder.latency_bounds();
    println!(
        "  {:<18} {}",
        "Placeholders:".bold(),
        format!(
            "{lo:.1}s–{hi:.1}s latency, seed {}",
            config
                .placeholder
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string())
        )
        .dimmed()
    );

    println!();
    println!("  {}", "Providers:".bold());
    for spec in PROVIDERS {
        let provider = config.providers.get_by_name(spec.name);
        let status = match provider {
            Some(p) if p.is_configured() => format!("{} (key set)", "✓".green()),
            _ => format!("{} ({} not set)", "· placeholder".dimmed(), spec.env_key),
        };
        let base = provider
            .and_then(|p| p.api_base.as_deref())
            .unwrap_or(spec.default_api_base);
        println!("    {:<20} {}", spec.display_name, status);
        println!("    {:<20} {}", "", base.dimmed());
    }
    println!();

    Ok(())
}
