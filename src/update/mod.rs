//! Update functions for the Elm-style architecture
//!
//! All outline state transformations flow through these functions.

mod lifecycle;
mod outline;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::OutlineModel;
use crate::tracing::OutlineSnapshot;

pub use lifecycle::{gate, update_lifecycle, GateDecision};
pub use outline::update_outline;

/// Main update function - dispatches to sub-handlers
///
/// Logs the message and the resulting state change at debug level.
pub fn update(model: &mut OutlineModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = tracing::debug_span!("update", msg = %msg_name).entered();
    tracing::debug!(target: "message", msg = %msg_name, "processing");

    let before = OutlineSnapshot::from_model(model);

    let result = match msg {
        Msg::Lifecycle(m) => lifecycle::update_lifecycle(model, m),
        Msg::Outline(m) => outline::update_outline(model, m),
    };

    if let Some(diff) = before.diff(&OutlineSnapshot::from_model(model)) {
        tracing::debug!(target: "outline", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Symbol payloads are summarized by count rather than dumped.
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::OutlineMsg;

    match msg {
        Msg::Lifecycle(m) => format!("Lifecycle::{:?}", m),
        Msg::Outline(OutlineMsg::SymbolsLoaded {
            document,
            generation,
            result,
        }) => match result {
            Ok(symbols) => format!(
                "Outline::SymbolsLoaded({}, gen {}, {} symbols)",
                document,
                generation,
                symbols.len()
            ),
            Err(e) => format!(
                "Outline::SymbolsLoaded({}, gen {}, error: {})",
                document, generation, e
            ),
        },
        Msg::Outline(m) => format!("Outline::{:?}", m),
    }
}
