//! Tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=outline=debug` - model state transitions only
//! - `RUST_LOG=symbol_outline::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/symbol-outline/logs/symbol-outline.log` with
//! daily rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths;
use crate::model::{OutlineModel, OutlineState};

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr and respects RUST_LOG (default `warn`).
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, config_paths::LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of model state for diffing across an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineSnapshot {
    pub state: OutlineState,
    pub document: Option<String>,
    pub generation: u64,
    pub symbols: usize,
    pub rebuilding: bool,
}

impl OutlineSnapshot {
    pub fn from_model(model: &OutlineModel) -> Self {
        Self {
            state: model.state(),
            document: model.document().map(|d| d.to_string()),
            generation: model.outline().generation(),
            symbols: model.outline().len(),
            rebuilding: model.is_rebuilding(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &OutlineSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.document != other.document {
            changes.push(format!(
                "document: {} → {}",
                self.document.as_deref().unwrap_or("none"),
                other.document.as_deref().unwrap_or("none")
            ));
        }
        if self.state != other.state {
            changes.push(format!("state: {:?} → {:?}", self.state, other.state));
        }
        if self.generation != other.generation {
            changes.push(format!(
                "forest: gen {} ({} symbols) → gen {} ({} symbols)",
                self.generation, self.symbols, other.generation, other.symbols
            ));
        }
        if self.rebuilding != other.rebuilding {
            changes.push(if other.rebuilding {
                "rebuild started".to_string()
            } else {
                "rebuild finished".to_string()
            });
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        }
    }
}
