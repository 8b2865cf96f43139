//! Text and JSON rendering of an outline, walked the way a tree widget would
//!
//! Both renderers only use the model's tree host queries (children, tree
//! item), so what they print is exactly what a sidebar would show.

use std::fmt::Write as _;

use serde::Serialize;

use crate::display::{CollapsibleState, DisplayRecord};
use crate::model::OutlineModel;
use crate::outline::{NodeId, SymbolKind};

const INDENT: &str = "  ";

/// Render the visible rows as an indented tree
///
/// Collapsed nodes hide their children unless `expand_all` is set.
///
/// ```text
/// ▾ class Foo  1:1-51:1
///     fn bar  6:5-11:6
/// ▸ fn qux  61:1-71:1
/// ```
pub fn render_tree(model: &OutlineModel, expand_all: bool) -> String {
    let mut out = String::new();
    for id in model.children(None) {
        render_row(model, id, 0, expand_all, &mut out);
    }
    out
}

fn render_row(model: &OutlineModel, id: NodeId, depth: usize, expand_all: bool, out: &mut String) {
    let (Some(item), Some(symbol)) = (model.tree_item(id), model.outline().symbol(id)) else {
        return;
    };

    let marker = match item.collapsible_state {
        CollapsibleState::Expanded => "▾",
        CollapsibleState::Collapsed => "▸",
        CollapsibleState::None => " ",
    };
    let _ = writeln!(
        out,
        "{}{} {} {}  {}",
        INDENT.repeat(depth),
        marker,
        symbol.kind.label(),
        item.label,
        symbol.range
    );

    let open = match item.collapsible_state {
        CollapsibleState::Expanded => true,
        CollapsibleState::Collapsed => expand_all,
        CollapsibleState::None => false,
    };
    if open {
        for child in model.children(Some(id)) {
            render_row(model, child, depth + 1, expand_all, out);
        }
    }
}

/// A display record with its kind and children, for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct RenderedNode {
    pub kind: SymbolKind,
    #[serde(flatten)]
    pub item: DisplayRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderedNode>,
}

/// The whole forest as nested display records
pub fn rendered_nodes(model: &OutlineModel) -> Vec<RenderedNode> {
    model
        .children(None)
        .into_iter()
        .filter_map(|id| rendered_node(model, id))
        .collect()
}

fn rendered_node(model: &OutlineModel, id: NodeId) -> Option<RenderedNode> {
    let item = model.tree_item(id)?;
    let kind = model.outline().symbol(id)?.kind;
    let children = model
        .children(Some(id))
        .into_iter()
        .filter_map(|child| rendered_node(model, child))
        .collect();
    Some(RenderedNode {
        kind,
        item,
        children,
    })
}

/// Pretty-printed JSON of [`rendered_nodes`]
pub fn render_json(model: &OutlineModel) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&rendered_nodes(model))
}

/// Names from the root down to `id`, e.g. `Foo > baz`
pub fn breadcrumb(model: &OutlineModel, id: NodeId) -> String {
    let mut names: Vec<&str> = std::iter::once(id)
        .chain(model.outline().ancestors(id))
        .filter_map(|node| model.outline().symbol(node))
        .map(|symbol| symbol.name.as_str())
        .collect();
    names.reverse();
    names.join(" > ")
}
