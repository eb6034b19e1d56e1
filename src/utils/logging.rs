//! Logging initialization for ReactLab.
//!
//! Supports three formats:
//! - `pretty`: multi-line human-readable output
//! - `component`: `timestamp LEVEL target: message {fields}` on one line, grep-friendly
//! - `json`: structured JSON lines for log aggregators
//!
//! Everything is written to stderr (or a file for `json`), so log lines never
//! mix with answers printed on stdout.

use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Initialize the global tracing subscriber from config.
///
/// Call this once at startup before any tracing events are emitted.
/// Falls back to `RUST_LOG` env var; if unset, uses `cfg.level`. A second
/// call is a no-op.
pub fn init_logging(cfg: &LoggingConfig) {
    let filter = build_filter(cfg);

    match cfg.format {
        LogFormat::Json => {
            let file = cfg.file.as_ref().and_then(|path| {
                std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| eprintln!("Cannot open log file {}: {}", path, e))
                    .ok()
            });
            let _ = match file {
                Some(file) => tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(Mutex::new(file))
                    .try_init(),
                None => tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .try_init(),
            };
        }
        LogFormat::Pretty => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .pretty()
                .try_init();
        }
        LogFormat::Component => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact()
                .try_init();
        }
    }
}

fn build_filter(cfg: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}
