use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::config::{ensure_settings_file, Settings};

pub fn execute(matches: &ArgMatches, settings_path: &Path) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(settings_path),
        Some(("reset", _)) => reset(settings_path),
        Some(("check", _)) => check(settings_path),
        _ => {
            println!("Use 'hostmon settings --help' for more information.");
            Ok(())
        }
    }
}

fn show(settings_path: &Path) -> Result<()> {
    let settings = Settings::load_from(settings_path);
    let json = serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?;

    println!("{}", format!("Settings ({}):", settings_path.display()).white());
    println!("{}", json.cyan());

    if let Err(e) = settings.poll_config() {
        println!("{}", format!("⚠️  Warning: {}", e).yellow());
    }
    Ok(())
}

fn reset(settings_path: &Path) -> Result<()> {
    Settings::default()
        .save_to(settings_path)
        .with_context(|| format!("Failed to write {}", settings_path.display()))?;

    println!(
        "{} {}",
        "✓ Settings reset to defaults:".green(),
        settings_path.display()
    );
    Ok(())
}

fn check(settings_path: &Path) -> Result<()> {
    let is_default = ensure_settings_file(settings_path)
        .with_context(|| format!("Failed to check {}", settings_path.display()))?;

    if is_default {
        println!("{}", "✓ Settings file holds the default values".green());
    } else {
        println!(
            "{}",
            "✓ Settings file is valid (custom values or freshly created)".green()
        );
    }
    Ok(())
}
