//! Invalidation gate for editor and document lifecycle events

use crate::commands::Cmd;
use crate::messages::{ActiveEditor, LifecycleMsg};
use crate::model::{DocumentId, OutlineModel};

/// What a lifecycle event means for the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Nothing the outline depends on changed
    Ignore,
    /// The tracked document's forest is out of date
    Invalidate,
    /// Follow another editor, or stop tracking with `None`
    Track(Option<ActiveEditor>),
}

/// Decide how `msg` affects an outline tracking `tracked`
///
/// Pure: never rebuilds, only classifies. Uncommitted (dirty) edits are
/// ignored so typing doesn't rebuild on every keystroke; reconciled edits and
/// saves of the tracked document invalidate.
pub fn gate(tracked: Option<&DocumentId>, msg: &LifecycleMsg) -> GateDecision {
    let is_tracked = |document: &DocumentId| tracked == Some(document);

    match msg {
        LifecycleMsg::ActiveEditorChanged(Some(active)) => GateDecision::Track(Some(active.clone())),
        LifecycleMsg::ActiveEditorChanged(None) => GateDecision::Ignore,
        LifecycleMsg::DocumentClosed(document) if is_tracked(document) => GateDecision::Track(None),
        LifecycleMsg::DocumentChanged { document, is_dirty } if !is_dirty && is_tracked(document) => {
            GateDecision::Invalidate
        }
        LifecycleMsg::DocumentSaved(document) if is_tracked(document) => GateDecision::Invalidate,
        LifecycleMsg::SettingsChanged if tracked.is_some() => GateDecision::Invalidate,
        _ => GateDecision::Ignore,
    }
}

/// Handle lifecycle messages
///
/// Applies the gate's decision and asks the host to re-query the root, which
/// is what eventually triggers the rebuild.
pub fn update_lifecycle(model: &mut OutlineModel, msg: LifecycleMsg) -> Option<Cmd> {
    match gate(model.document(), &msg) {
        GateDecision::Ignore => None,
        GateDecision::Invalidate => {
            model.invalidate();
            Some(Cmd::TreeChanged)
        }
        GateDecision::Track(active) => {
            model.track(active);
            Some(Cmd::TreeChanged)
        }
    }
}
