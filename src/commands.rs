//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::model::{DocumentId, EditorId};
use crate::outline::Range;

/// Commands returned from update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Tell the tree host that the root may have changed and should be re-queried
    TreeChanged,
    /// Ask the symbol provider for `document`'s symbols off the model thread
    /// Sends Msg::Outline(SymbolsLoaded) with the same generation when done
    FetchSymbols {
        document: DocumentId,
        generation: u64,
    },
    /// Move the caret/selection in `editor` to `range` and focus it
    RevealRange {
        editor: Option<EditorId>,
        range: Range,
    },
}

impl Cmd {
    /// Check if this command should make the host re-query the tree
    pub fn notifies_host(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::TreeChanged => true,
            // The fetch result triggers its own notification once installed
            Cmd::FetchSymbols { .. } => false,
            Cmd::RevealRange { .. } => false,
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
