//! Display mapping for outline nodes
//!
//! Turns a node into what a tree widget needs: label, expansion state, icon
//! and the activation that reveals the symbol in its editor.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::ConfigSnapshot;
use crate::model::EditorId;
use crate::outline::{OutlineNode, Range, SymbolKind};

/// Directory holding the icon themes, relative to the host's resources
pub const ICON_DIR: &str = "resources";

/// Whether a tree item can be expanded, and how it starts out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CollapsibleState {
    None,
    Collapsed,
    Expanded,
}

/// Icon family for a symbol kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Icon {
    Class,
    Constant,
    Function,
    Module,
    Property,
    Variable,
}

impl Icon {
    /// Icon shown for `kind`
    ///
    /// Interfaces use the module icon, like namespaces and packages.
    pub fn for_kind(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Class => Icon::Class,
            SymbolKind::Constant => Icon::Constant,
            SymbolKind::Constructor | SymbolKind::Function | SymbolKind::Method => Icon::Function,
            SymbolKind::Interface
            | SymbolKind::Module
            | SymbolKind::Namespace
            | SymbolKind::Object
            | SymbolKind::Package => Icon::Module,
            SymbolKind::Property => Icon::Property,
            _ => Icon::Variable,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Icon::Class => "class",
            Icon::Constant => "constant",
            Icon::Function => "function",
            Icon::Module => "module",
            Icon::Property => "property",
            Icon::Variable => "variable",
        }
    }

    pub fn file_name(self) -> String {
        format!("icon-{}.svg", self.name())
    }
}

/// Icon paths for both themes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconRef {
    pub icon: Icon,
    pub light: PathBuf,
    pub dark: PathBuf,
}

impl IconRef {
    pub fn new(icon: Icon) -> Self {
        let file_name = icon.file_name();
        Self {
            icon,
            light: PathBuf::from(ICON_DIR).join("light").join(&file_name),
            dark: PathBuf::from(ICON_DIR).join("dark").join(&file_name),
        }
    }
}

/// What activating a tree item does: reveal `range` in `editor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub editor: Option<EditorId>,
    pub range: Range,
}

/// Presentation of a single outline node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub label: String,
    pub collapsible_state: CollapsibleState,
    pub icon: IconRef,
    pub activation: Activation,
}

/// Map `node` to its display record, `None` for the synthetic root
pub fn present(
    node: &OutlineNode,
    config: &ConfigSnapshot,
    editor: Option<EditorId>,
) -> Option<DisplayRecord> {
    let symbol = node.symbol.as_ref()?;

    let collapsible_state = if !node.is_collapsible() {
        CollapsibleState::None
    } else if config.expands_kind(symbol.kind) {
        CollapsibleState::Expanded
    } else {
        CollapsibleState::Collapsed
    };

    let range = if config.do_select {
        symbol.range
    } else {
        Range::caret(symbol.range.start)
    };

    Some(DisplayRecord {
        label: symbol.name.clone(),
        collapsible_state,
        icon: IconRef::new(Icon::for_kind(symbol.kind)),
        activation: Activation { editor, range },
    })
}
