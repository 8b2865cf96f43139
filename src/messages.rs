//! Message types for the Elm-style architecture
//!
//! All outline state changes flow through these message types.

use crate::model::{DocumentId, EditorId};
use crate::outline::{Range, SymbolRecord};
use crate::provider::ProviderError;

/// The editor that currently has focus, and the document it shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEditor {
    pub editor: EditorId,
    pub document: DocumentId,
}

/// Editor and document lifecycle events observed by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleMsg {
    /// Focus moved to another editor, or away from all editors (`None`)
    ActiveEditorChanged(Option<ActiveEditor>),
    /// A document was closed
    DocumentClosed(DocumentId),
    /// Document content changed
    DocumentChanged {
        document: DocumentId,
        /// The edit hasn't been reconciled yet (uncommitted typing)
        is_dirty: bool,
    },
    /// A document was written to disk
    DocumentSaved(DocumentId),
    /// Outline settings were edited
    SettingsChanged,
}

/// Outline model messages
#[derive(Debug, Clone)]
pub enum OutlineMsg {
    /// The symbol provider answered a fetch
    SymbolsLoaded {
        document: DocumentId,
        generation: u64,
        result: Result<Vec<SymbolRecord>, ProviderError>,
    },
    /// The user activated a node; reveal `range` in `editor`
    Activate {
        editor: Option<EditorId>,
        range: Range,
    },
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Lifecycle(LifecycleMsg),
    Outline(OutlineMsg),
}
