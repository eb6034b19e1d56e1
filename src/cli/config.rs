//! Config command handlers.

use anyhow::{Context, Result};

use reactlab::config::validate::{validate_config, validate_effective, DiagnosticLevel};
use reactlab::config::Config;

use super::ConfigAction;

pub(crate) fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }
        ConfigAction::Show => {
            let config = Config::load().context("Failed to load configuration")?;
            let rendered = serde_json::to_string_pretty(&config.masked())
                .context("Failed to serialize configuration")?;
            println!("{}", rendered);
        }
        ConfigAction::Check => {
            if !cmd_config_check()? {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

/// Validate the config file and the effective configuration.
///
/// Returns whether the configuration is free of errors.
fn cmd_config_check() -> Result<bool> {
    let config_path = Config::path();
    println!("Config file: {}", config_path.display());

    let mut diagnostics = Vec::new();
    if config_path.exists() {
        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(raw) => diagnostics.extend(validate_config(&raw)),
            Err(e) => {
                println!("[ERROR] Invalid JSON: {}", e);
                return Ok(false);
            }
        }
    } else {
        println!("[OK] No config file found (using defaults)");
    }

    match Config::load() {
        Ok(config) => diagnostics.extend(validate_effective(&config)),
        Err(e) => {
            println!("[ERROR] {}", e);
            return Ok(false);
        }
    }

    for diag in &diagnostics {
        println!("{}", diag);
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warn)
        .count();

    if errors == 0 && warnings == 0 {
        println!("\nConfiguration looks good!");
    } else {
        println!("\nFound {} error(s), {} warning(s)", errors, warnings);
    }

    Ok(errors == 0)
}
