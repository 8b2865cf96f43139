//! symbol-outline - hierarchical symbol outlines for source documents
//!
//! This crate turns the flat symbol lists reported for a document into a
//! nested, sorted outline and keeps it in sync with editor lifecycle events,
//! following the Elm Architecture pattern (messages, update, commands).

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod display;
pub mod fs_watcher;
pub mod messages;
pub mod model;
pub mod outline;
pub mod provider;
pub mod render;
pub mod runtime;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::{ConfigSnapshot, OutlineSettings};
pub use messages::Msg;
pub use model::{DocumentId, EditorId, OutlineModel, OutlineState};
pub use runtime::{OutlineRuntime, TreeListener};
