//! Runtime - drives the outline model for a tree host
//!
//! Owns the model, runs provider fetches on worker threads and feeds their
//! results back through a channel. All model mutation happens on the thread
//! that owns the runtime.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::commands::Cmd;
use crate::display::DisplayRecord;
use crate::messages::{LifecycleMsg, Msg, OutlineMsg};
use crate::model::{EditorId, OutlineModel};
use crate::outline::{NodeId, Position, Range};
use crate::provider::{ProviderError, SymbolProvider};
use crate::update::update;

/// Callbacks into the tree widget hosting the outline
pub trait TreeListener {
    /// The root may have changed; re-query from the top
    fn on_tree_changed(&mut self);

    /// Move the caret/selection in `editor` to `range` and focus it
    fn reveal(&mut self, editor: Option<EditorId>, range: Range);
}

/// Listener that ignores everything
impl TreeListener for () {
    fn on_tree_changed(&mut self) {}

    fn reveal(&mut self, _editor: Option<EditorId>, _range: Range) {}
}

pub struct OutlineRuntime<P: SymbolProvider + 'static, L: TreeListener> {
    model: OutlineModel,
    provider: Arc<P>,
    listener: L,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl<P: SymbolProvider + 'static, L: TreeListener> OutlineRuntime<P, L> {
    pub fn new(model: OutlineModel, provider: P, listener: L) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            provider: Arc::new(provider),
            listener,
            msg_tx,
            msg_rx,
        }
    }

    pub fn model(&self) -> &OutlineModel {
        &self.model
    }

    /// The provider fetches run against; hosts update it as documents change
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Run a message through the model and carry out the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Shorthand for dispatching a lifecycle event
    pub fn lifecycle(&mut self, msg: LifecycleMsg) {
        self.dispatch(Msg::Lifecycle(msg));
    }

    // ========================================================================
    // Tree host API
    // ========================================================================

    /// Children of `parent`, or of the root when `None`
    ///
    /// A root request on an out-of-date forest starts a rebuild and answers
    /// with the current (possibly stale) children; the listener hears about
    /// the new forest once it is installed.
    pub fn get_children(&mut self, parent: Option<NodeId>) -> Vec<NodeId> {
        if parent.is_none() {
            if let Some(cmd) = self.model.ensure_current() {
                self.process_cmd(cmd);
            }
        }
        self.model.children(parent)
    }

    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.model.parent(id)
    }

    pub fn get_tree_item(&self, id: NodeId) -> Option<DisplayRecord> {
        self.model.tree_item(id)
    }

    pub fn find_node_at_position(&self, position: Position) -> Option<NodeId> {
        self.model.node_at_position(position)
    }

    /// Activate `id`, revealing its symbol in the tracked editor
    ///
    /// Returns false for ids the current forest doesn't know.
    pub fn activate(&mut self, id: NodeId) -> bool {
        let Some(item) = self.model.tree_item(id) else {
            return false;
        };
        self.dispatch(Msg::Outline(OutlineMsg::Activate {
            editor: item.activation.editor,
            range: item.activation.range,
        }));
        true
    }

    // ========================================================================
    // Command processing
    // ========================================================================

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::TreeChanged => self.listener.on_tree_changed(),
            Cmd::FetchSymbols {
                document,
                generation,
            } => {
                let tx = self.msg_tx.clone();
                let provider = Arc::clone(&self.provider);
                std::thread::spawn(move || {
                    // Every fetch answers, even when the provider panics
                    let fetch = AssertUnwindSafe(|| provider.symbols(&document));
                    let result = panic::catch_unwind(fetch).unwrap_or_else(|payload| {
                        Err(ProviderError::Unavailable(format!(
                            "provider panicked for {}: {}",
                            document,
                            panic_message(payload.as_ref())
                        )))
                    });
                    let _ = tx.send(Msg::Outline(OutlineMsg::SymbolsLoaded {
                        document,
                        generation,
                        result,
                    }));
                });
            }
            Cmd::RevealRange { editor, range } => self.listener.reveal(editor, range),
        }
    }

    /// Apply every result that has arrived, without blocking
    ///
    /// Returns true if anything was processed.
    pub fn process_pending(&mut self) -> bool {
        let mut processed = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            processed = true;
        }
        processed
    }

    /// Block until no rebuild is in flight
    pub fn wait_for_rebuild(&mut self) {
        while self.model.is_rebuilding() {
            // The runtime holds a sender, so this only fails if that's gone
            match self.msg_rx.recv() {
                Ok(msg) => self.dispatch(msg),
                Err(_) => break,
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
