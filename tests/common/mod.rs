//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use symbol_outline::config::OutlineSettings;
use symbol_outline::messages::{ActiveEditor, LifecycleMsg, Msg, OutlineMsg};
use symbol_outline::model::{DocumentId, EditorId, OutlineModel};
use symbol_outline::outline::{NodeId, Position, Range, SymbolKind, SymbolRecord};
use symbol_outline::provider::InMemoryProvider;
use symbol_outline::runtime::{OutlineRuntime, TreeListener};
use symbol_outline::update::update;
use symbol_outline::Cmd;

pub const DOC: &str = "src/shapes.rs";

/// Shorthand for a whole-line symbol
pub fn sym(name: &str, kind: SymbolKind, start_line: u32, end_line: u32) -> SymbolRecord {
    SymbolRecord::new(name, kind, Range::lines(start_line, end_line))
}

/// Foo [0,50] { bar [5,10], baz [12,40] }, qux [60,70]
pub fn scenario_symbols() -> Vec<SymbolRecord> {
    vec![
        sym("Foo", SymbolKind::Class, 0, 50),
        sym("bar", SymbolKind::Method, 5, 10),
        sym("baz", SymbolKind::Method, 12, 40),
        sym("qux", SymbolKind::Function, 60, 70),
    ]
}

/// A deeper, unordered list with nesting three levels down
pub fn nested_symbols() -> Vec<SymbolRecord> {
    vec![
        SymbolRecord::new(
            "area",
            SymbolKind::Method,
            Range::new(Position::new(14, 4), Position::new(18, 5)),
        ),
        sym("shapes", SymbolKind::Module, 0, 40),
        sym("PI", SymbolKind::Constant, 2, 2),
        sym("Circle", SymbolKind::Struct, 4, 8),
        SymbolRecord::new(
            "radius",
            SymbolKind::Field,
            Range::new(Position::new(5, 4), Position::new(5, 20)),
        ),
        sym("impl Circle", SymbolKind::Object, 10, 30),
        sym("new", SymbolKind::Constructor, 11, 13),
        SymbolRecord::new(
            "r2",
            SymbolKind::Variable,
            Range::new(Position::new(15, 8), Position::new(15, 30)),
        ),
        sym("main", SymbolKind::Function, 42, 50),
    ]
}

pub fn active(editor: u64, document: &str) -> ActiveEditor {
    ActiveEditor {
        editor: EditorId(editor),
        document: DocumentId::new(document),
    }
}

/// Build a model for `DOC` synchronously by feeding the fetch result back by hand
pub fn built_model(symbols: Vec<SymbolRecord>, settings: OutlineSettings) -> OutlineModel {
    let mut model = OutlineModel::new(settings);
    update(
        &mut model,
        Msg::Lifecycle(LifecycleMsg::ActiveEditorChanged(Some(active(1, DOC)))),
    );
    let generation = match model.ensure_current() {
        Some(Cmd::FetchSymbols { generation, .. }) => generation,
        other => panic!("expected a fetch, got {:?}", other),
    };
    update(
        &mut model,
        Msg::Outline(OutlineMsg::SymbolsLoaded {
            document: DocumentId::new(DOC),
            generation,
            result: Ok(symbols),
        }),
    );
    model
}

/// Tree listener that records every callback
#[derive(Debug, Default)]
pub struct Recorder {
    pub changes: usize,
    pub reveals: Vec<(Option<EditorId>, Range)>,
}

impl TreeListener for Recorder {
    fn on_tree_changed(&mut self) {
        self.changes += 1;
    }

    fn reveal(&mut self, editor: Option<EditorId>, range: Range) {
        self.reveals.push((editor, range));
    }
}

pub type TestRuntime = OutlineRuntime<InMemoryProvider, Recorder>;

/// Runtime whose provider knows `symbols` for `DOC`, not yet tracking anything
pub fn runtime_with(symbols: Vec<SymbolRecord>, settings: OutlineSettings) -> TestRuntime {
    let provider = InMemoryProvider::new();
    provider.set(DocumentId::new(DOC), symbols);
    OutlineRuntime::new(OutlineModel::new(settings), provider, Recorder::default())
}

/// Focus an editor showing `document`
pub fn open(rt: &mut TestRuntime, editor: u64, document: &str) {
    rt.lifecycle(LifecycleMsg::ActiveEditorChanged(Some(active(editor, document))));
}

/// Request the root like a tree widget and wait for any rebuild it starts
pub fn refresh(rt: &mut TestRuntime) -> Vec<NodeId> {
    rt.get_children(None);
    rt.wait_for_rebuild();
    rt.get_children(None)
}

pub fn labels(rt: &TestRuntime, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|id| rt.get_tree_item(*id).unwrap().label)
        .collect()
}

/// Find a node by name anywhere in the current forest
pub fn find(model: &OutlineModel, name: &str) -> NodeId {
    model
        .outline()
        .descendants()
        .into_iter()
        .find(|id| model.outline().symbol(*id).is_some_and(|s| s.name == name))
        .unwrap_or_else(|| panic!("no node named {}", name))
}
