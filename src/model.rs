//! Outline model - the state behind the outline sidebar
//!
//! Holds the forest for the tracked document and the state machine that
//! decides when it must be rebuilt. Rebuilds are lazy: lifecycle events only
//! mark the forest stale, and the next request for the root's children starts
//! a fetch. Results come back as messages handled in `update::outline`.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::commands::Cmd;
use crate::config::{ConfigSnapshot, SettingsSource};
use crate::display::{present, DisplayRecord};
use crate::messages::ActiveEditor;
use crate::outline::{NodeId, Outline, Position};
use crate::provider::ProviderError;

// ============================================================================
// Identifiers
// ============================================================================

/// Identity of a document, as understood by the symbol provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    /// The identity read as a filesystem path
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for an editor view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EditorId(pub u64);

// ============================================================================
// Model
// ============================================================================

/// Lifecycle of the forest for the tracked document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineState {
    /// No document, or its symbols were never fetched
    Empty,
    /// The forest reflects the document
    Built,
    /// The forest is readable but out of date
    Stale,
}

/// A fetch that has been issued and not yet answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rebuild {
    pub generation: u64,
    pub document: DocumentId,
    /// An invalidation arrived after the fetch started
    pub invalidated: bool,
}

/// The complete outline state
pub struct OutlineModel {
    pub(crate) document: Option<DocumentId>,
    pub(crate) editor: Option<EditorId>,
    pub(crate) outline: Outline,
    /// Snapshot the current forest was built with
    pub(crate) config: ConfigSnapshot,
    pub(crate) state: OutlineState,
    pub(crate) next_generation: u64,
    pub(crate) in_flight: Option<Rebuild>,
    pub(crate) settings: Box<dyn SettingsSource>,
    pub(crate) last_error: Option<ProviderError>,
}

impl fmt::Debug for OutlineModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineModel")
            .field("document", &self.document)
            .field("editor", &self.editor)
            .field("state", &self.state)
            .field("generation", &self.outline.generation())
            .field("symbols", &self.outline.len())
            .field("in_flight", &self.in_flight)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl OutlineModel {
    /// Create an empty model reading its settings from `settings`
    pub fn new<S: SettingsSource + 'static>(settings: S) -> Self {
        Self::with_settings(Box::new(settings))
    }

    pub fn with_settings(settings: Box<dyn SettingsSource>) -> Self {
        Self {
            document: None,
            editor: None,
            outline: Outline::empty(0),
            config: ConfigSnapshot::default(),
            state: OutlineState::Empty,
            next_generation: 1,
            in_flight: None,
            settings,
            last_error: None,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> OutlineState {
        self.state
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn config(&self) -> &ConfigSnapshot {
        &self.config
    }

    pub fn document(&self) -> Option<&DocumentId> {
        self.document.as_ref()
    }

    pub fn editor(&self) -> Option<EditorId> {
        self.editor
    }

    /// Whether a fetch is waiting for the provider
    pub fn is_rebuilding(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The most recent provider failure, cleared by the next successful rebuild
    pub fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    // ------------------------------------------------------------------------
    // Rebuild orchestration
    // ------------------------------------------------------------------------

    fn bump_generation(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        generation
    }

    /// Make sure the forest is current, starting a rebuild if it isn't
    ///
    /// Called when the host asks for the root's children. Returns the fetch to
    /// run, or `None` when the forest is already built, a fetch for the same
    /// document is still in flight, or there is no document (in which case an
    /// empty forest is installed immediately).
    pub fn ensure_current(&mut self) -> Option<Cmd> {
        if self.state == OutlineState::Built {
            return None;
        }

        let Some(document) = self.document.clone() else {
            let generation = self.bump_generation();
            self.outline = Outline::empty(generation);
            self.state = OutlineState::Built;
            return None;
        };

        if let Some(rebuild) = &self.in_flight {
            if rebuild.document == document {
                tracing::debug!(
                    "Rebuild for {} already in flight (generation {})",
                    document,
                    rebuild.generation
                );
                return None;
            }
        }

        let generation = self.bump_generation();
        tracing::debug!("Starting rebuild of {} (generation {})", document, generation);
        self.in_flight = Some(Rebuild {
            generation,
            document: document.clone(),
            invalidated: false,
        });
        Some(Cmd::FetchSymbols {
            document,
            generation,
        })
    }

    /// Mark the forest out of date without discarding it
    pub fn invalidate(&mut self) {
        if self.state == OutlineState::Built {
            self.state = OutlineState::Stale;
        }
        if let Some(rebuild) = &mut self.in_flight {
            rebuild.invalidated = true;
        }
    }

    /// Follow a new active editor, or stop tracking with `None`
    ///
    /// The same document only refreshes the editor handle and invalidates.
    /// A different document replaces the forest wholesale with an empty one,
    /// so no node of the previous document outlives the switch.
    pub fn track(&mut self, active: Option<ActiveEditor>) {
        match active {
            Some(active) if self.document.as_ref() == Some(&active.document) => {
                self.editor = Some(active.editor);
                self.invalidate();
            }
            Some(active) => {
                tracing::debug!("Tracking {}", active.document);
                self.editor = Some(active.editor);
                self.document = Some(active.document);
                self.reset();
            }
            None => {
                if let Some(document) = &self.document {
                    tracing::debug!("Stopped tracking {}", document);
                }
                self.editor = None;
                self.document = None;
                self.reset();
            }
        }
    }

    fn reset(&mut self) {
        let generation = self.bump_generation();
        self.outline = Outline::empty(generation);
        self.state = OutlineState::Empty;
        self.in_flight = None;
        self.last_error = None;
    }

    // ------------------------------------------------------------------------
    // Tree host queries
    // ------------------------------------------------------------------------

    /// Children of `parent`, or of the root when `None`
    ///
    /// Always served from the current forest; see [`Self::ensure_current`].
    pub fn children(&self, parent: Option<NodeId>) -> Vec<NodeId> {
        let parent = parent.unwrap_or_else(|| self.outline.root());
        self.outline.children(parent).to_vec()
    }

    /// Parent of `id`; `None` for root children and ids from other forests
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.outline
            .parent(id)
            .filter(|parent| !self.outline.is_root(*parent))
    }

    /// Presentation of `id`, `None` for the root and ids from other forests
    pub fn tree_item(&self, id: NodeId) -> Option<DisplayRecord> {
        let node = self.outline.node(id)?;
        present(node, &self.config, self.editor)
    }

    /// Deepest node whose range contains `position`
    pub fn node_at_position(&self, position: Position) -> Option<NodeId> {
        self.outline.node_at_position(position)
    }
}
