//! `arena init`: write a default `~/.arena/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use arena_core::config::{get_config_path, save_config, Config};

pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(get_config_path);

    println!();
    println!("{}", "⚖️  Arena Setup".cyan().bold());
    println!();

    if write_default(&path)? {
        println!("  {} created config at {}", "✓".green(), path.display());
    } else {
        println!("  {} config already exists at {}", "✓".green(), path.display());
    }

    println!();
    println!(
        "  Set {} or {} (or edit the file) to enable live answers.",
        "GROQ_API_KEY".bold(),
        "GEMINI_API_KEY".bold()
    );
    println!("{}", "  Then run `arena serve`.".green());
    println!();

    Ok(())
}

/// Write `Config::default()` to `path` unless a file is already there.
/// Returns whether a file was written.
fn write_default(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write config: {}", path.display()))?;
    Ok(true)
}
