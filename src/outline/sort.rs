//! Sibling ordering for outline forests

use std::cmp::Ordering;

use super::{Outline, SymbolRecord};
use crate::config::ConfigSnapshot;

/// Order every node's children by kind priority, then case-insensitive name
///
/// Does nothing when sorting is disabled, leaving children in build order.
/// The sort is stable, so sorting an already sorted forest changes nothing.
pub fn sort_outline(outline: &mut Outline, config: &ConfigSnapshot) {
    if !config.do_sort {
        return;
    }
    outline.sort_children_by(|a, b| compare_symbols(a, b, config));
}

fn compare_symbols(a: &SymbolRecord, b: &SymbolRecord, config: &ConfigSnapshot) -> Ordering {
    config
        .sort_priority(a.kind)
        .cmp(&config.sort_priority(b.kind))
        .then_with(|| compare_names(&a.name, &b.name))
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutlineSettings;
    use crate::outline::{build_outline, NodeId, Range, SymbolKind};

    fn sym(name: &str, kind: SymbolKind, start: u32, end: u32) -> SymbolRecord {
        SymbolRecord::new(name, kind, Range::lines(start, end))
    }

    fn names(outline: &Outline, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| outline.symbol(*id).unwrap().name.clone())
            .collect()
    }

    fn config_with_order(order: &[&str]) -> ConfigSnapshot {
        ConfigSnapshot::resolve(&OutlineSettings {
            sort_order: order.iter().map(|s| s.to_string()).collect(),
            ..OutlineSettings::default()
        })
    }

    fn sorted(symbols: Vec<SymbolRecord>, config: &ConfigSnapshot) -> Outline {
        let mut outline = build_outline(symbols, config, 0);
        sort_outline(&mut outline, config);
        outline
    }

    #[test]
    fn test_kind_priority_beats_name() {
        let config = config_with_order(&["Interface", "Class"]);
        for symbols in [
            vec![
                sym("Zebra", SymbolKind::Class, 0, 5),
                sym("Apple", SymbolKind::Interface, 10, 15),
            ],
            vec![
                sym("Apple", SymbolKind::Interface, 10, 15),
                sym("Zebra", SymbolKind::Class, 0, 5),
            ],
        ] {
            let outline = sorted(symbols, &config);
            assert_eq!(
                names(&outline, outline.children(outline.root())),
                vec!["Apple", "Zebra"]
            );
        }
    }

    #[test]
    fn test_equal_priority_sorts_by_name_case_insensitively() {
        let config = ConfigSnapshot::default();
        let symbols = vec![
            sym("banana", SymbolKind::Function, 0, 5),
            sym("Cherry", SymbolKind::Function, 10, 15),
            sym("Apple", SymbolKind::Function, 20, 25),
        ];
        let outline = sorted(symbols, &config);
        assert_eq!(
            names(&outline, outline.children(outline.root())),
            vec!["Apple", "banana", "Cherry"]
        );
    }

    #[test]
    fn test_unlisted_kinds_use_wildcard_slot() {
        // Default order: Class, Module, Constant, Interface, *, Constructor, Function, Method
        let config = ConfigSnapshot::default();
        let symbols = vec![
            sym("run", SymbolKind::Method, 0, 5),
            sym("count", SymbolKind::Variable, 10, 15),
            sym("Thing", SymbolKind::Class, 20, 25),
            sym("new", SymbolKind::Constructor, 30, 35),
        ];
        let outline = sorted(symbols, &config);
        assert_eq!(
            names(&outline, outline.children(outline.root())),
            vec!["Thing", "count", "new", "run"]
        );
    }

    #[test]
    fn test_unlisted_kinds_without_wildcard_sort_first() {
        let config = config_with_order(&["Class", "Method"]);
        let symbols = vec![
            sym("Thing", SymbolKind::Class, 0, 5),
            sym("count", SymbolKind::Variable, 10, 15),
        ];
        let outline = sorted(symbols, &config);
        assert_eq!(
            names(&outline, outline.children(outline.root())),
            vec!["count", "Thing"]
        );
    }

    #[test]
    fn test_nested_children_are_sorted() {
        let config = ConfigSnapshot::default();
        let symbols = vec![
            sym("Foo", SymbolKind::Class, 0, 50),
            sym("zeta", SymbolKind::Method, 5, 10),
            sym("alpha", SymbolKind::Method, 12, 40),
        ];
        let outline = sorted(symbols, &config);
        let foo = outline.children(outline.root())[0];
        assert_eq!(names(&outline, outline.children(foo)), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_disabled_sort_keeps_build_order() {
        let config = ConfigSnapshot::resolve(&OutlineSettings {
            do_sort: false,
            ..OutlineSettings::default()
        });
        let symbols = vec![
            sym("zeta", SymbolKind::Function, 0, 5),
            sym("Alpha", SymbolKind::Class, 10, 15),
        ];
        let outline = sorted(symbols, &config);
        assert_eq!(
            names(&outline, outline.children(outline.root())),
            vec!["zeta", "Alpha"]
        );
    }

    #[test]
    fn test_sorting_twice_is_a_no_op() {
        let config = ConfigSnapshot::default();
        let symbols = vec![
            sym("b", SymbolKind::Function, 0, 5),
            sym("B", SymbolKind::Function, 10, 15),
            sym("Klass", SymbolKind::Class, 20, 60),
            sym("m2", SymbolKind::Method, 22, 25),
            sym("M1", SymbolKind::Method, 30, 35),
            sym("a", SymbolKind::Function, 70, 75),
        ];
        let mut outline = sorted(symbols, &config);
        let before: Vec<Vec<NodeId>> = std::iter::once(outline.root())
            .chain(outline.descendants())
            .map(|id| outline.children(id).to_vec())
            .collect();

        sort_outline(&mut outline, &config);
        let after: Vec<Vec<NodeId>> = std::iter::once(outline.root())
            .chain(outline.descendants())
            .map(|id| outline.children(id).to_vec())
            .collect();

        assert_eq!(before, after);
        // Names equal ignoring case keep their relative input order
        assert_eq!(
            names(&outline, outline.children(outline.root())),
            vec!["Klass", "a", "b", "B"]
        );
    }
}
