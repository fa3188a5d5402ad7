//! `arena models`: list the catalog with backend mode and prices.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use arena_providers::{price_for, BackendKind};

use crate::helpers;

pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    let config = crate::load(config_path.as_ref());
    let comparator = crate::build_comparator(&config)?;

    println!();
    println!("{}", "⚖️  Arena Models".cyan().bold());
    println!();
    println!(
        "  {:<16} {:<20} {:<10} {:<14} {}",
        "ID".bold(),
        "Name".bold(),
        "Provider".bold(),
        "Mode".bold(),
        "$ / 1M in · out".bold()
    );

    for model in comparator.registry().models() {
        let d = &model.descriptor;
        let price = match price_for(&d.id) {
            Some(p) => format!("{:.2} · {:.2}", p.input_per_million, p.output_per_million),
            None => "-".to_string(),
        };
        println!(
            "  {:<16} {:<20} {:<10} {:<14} {}",
            d.id,
            d.display_name,
            d.provider_name,
            helpers::mode_label(model.kind() == BackendKind::Live),
            price.dimmed()
        );
    }
    println!();

    Ok(())
}
