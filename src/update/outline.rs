//! Outline update handlers: installing rebuilt forests and activating nodes

use crate::commands::Cmd;
use crate::config::ConfigSnapshot;
use crate::messages::OutlineMsg;
use crate::model::{OutlineModel, OutlineState};
use crate::outline::{build_outline, sort_outline};

/// Handle outline messages
pub fn update_outline(model: &mut OutlineModel, msg: OutlineMsg) -> Option<Cmd> {
    match msg {
        OutlineMsg::SymbolsLoaded {
            document,
            generation,
            result,
        } => {
            // Only the in-flight fetch for the tracked document may install
            let Some(rebuild) = model.in_flight.as_ref() else {
                tracing::debug!(
                    "Discarding symbols for {} (generation {}): no rebuild in flight",
                    document,
                    generation
                );
                return None;
            };
            if rebuild.generation != generation || rebuild.document != document {
                tracing::debug!(
                    "Discarding stale symbols for {}: generation {} != in-flight generation {}",
                    document,
                    generation,
                    rebuild.generation
                );
                return None;
            }

            // Invariant: the in-flight rebuild is always for the tracked document
            let invalidated = rebuild.invalidated;
            model.in_flight = None;

            match result {
                Ok(symbols) => {
                    let config = ConfigSnapshot::resolve(&model.settings.settings());
                    let count = symbols.len();
                    let mut outline = build_outline(symbols, &config, generation);
                    sort_outline(&mut outline, &config);

                    model.outline = outline;
                    model.config = config;
                    model.last_error = None;
                    model.state = if invalidated {
                        OutlineState::Stale
                    } else {
                        OutlineState::Built
                    };

                    tracing::debug!(
                        "Installed outline for {}: {} of {} symbols, generation {}",
                        document,
                        model.outline.len(),
                        count,
                        generation
                    );
                    Some(Cmd::TreeChanged)
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch symbols for {}: {}", document, e);
                    // Keep whatever forest we had; the next root request retries
                    if model.state == OutlineState::Built {
                        model.state = OutlineState::Stale;
                    }
                    model.last_error = Some(e);
                    None
                }
            }
        }

        OutlineMsg::Activate { editor, range } => {
            tracing::debug!("Revealing {} in {:?}", range, editor);
            Some(Cmd::RevealRange { editor, range })
        }
    }
}
