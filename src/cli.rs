//! Command-line argument parsing for the outline viewer
//!
//! Supports:
//! - Rendering the outline of a symbols file
//! - Locating the symbol at a line/column
//! - JSON output of display records
//! - Watch mode, re-rendering on save

use clap::Parser;
use std::path::PathBuf;

use crate::outline::Position;

/// Show the nested outline of a flat symbol list
#[derive(Parser, Debug)]
#[command(
    name = "symbol-outline",
    version,
    about = "Show the nested outline of a flat symbol list"
)]
pub struct CliArgs {
    /// Symbols file (.json, .yaml or .yml)
    #[arg(value_name = "SYMBOLS")]
    pub symbols: PathBuf,

    /// Settings file (defaults to ~/.config/symbol-outline/config.yaml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report the symbol at line N
    #[arg(long, value_name = "N")]
    pub line: Option<u32>,

    /// Column N (used with --line)
    #[arg(long, value_name = "N")]
    pub column: Option<u32>,

    /// Print display records as JSON instead of a tree
    #[arg(long)]
    pub json: bool,

    /// Keep running and re-render whenever the symbols or settings file is saved
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Show collapsed nodes' children too
    #[arg(short = 'a', long)]
    pub expand_all: bool,
}

/// How the outline is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tree,
    Json,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub symbols: PathBuf,
    /// Explicit settings file; `None` uses the default location
    pub settings: Option<PathBuf>,
    /// Position to look up - 1-indexed from user, converted to 0-indexed
    pub position: Option<Position>,
    pub format: OutputFormat,
    pub watch: bool,
    pub expand_all: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        if self.symbols.is_dir() {
            return Err(format!(
                "{} is a directory, expected a symbols file",
                self.symbols.display()
            ));
        }
        if self.column.is_some() && self.line.is_none() {
            return Err("--column requires --line".to_string());
        }

        // Convert from 1-indexed (user input) to 0-indexed (internal)
        let position = self.line.map(|line| {
            Position::new(
                line.saturating_sub(1),
                self.column.unwrap_or(1).saturating_sub(1),
            )
        });

        Ok(RunConfig {
            symbols: self.symbols,
            settings: self.config,
            position,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Tree
            },
            watch: self.watch,
            expand_all: self.expand_all,
        })
    }
}
