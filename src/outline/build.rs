//! Nesting flat symbol lists by range containment

use super::{Outline, Range, SymbolRecord};
use crate::config::ConfigSnapshot;

/// Build an outline forest from a flat symbol list
///
/// Symbols whose kind is excluded by the top-level filter are dropped before
/// nesting, so they can't become anyone's ancestor or descendant. Each
/// remaining symbol is then attached to its tightest strictly-enclosing range,
/// or to the root when nothing encloses it. Declared container names are not
/// consulted. Children keep input order; [`super::sort_outline`] reorders them.
pub fn build_outline(
    symbols: Vec<SymbolRecord>,
    config: &ConfigSnapshot,
    generation: u64,
) -> Outline {
    let symbols: Vec<SymbolRecord> = if config.keeps_all_kinds() {
        symbols
    } else {
        symbols
            .into_iter()
            .filter(|symbol| config.keeps_kind(symbol.kind))
            .collect()
    };

    let ranges: Vec<Range> = symbols.iter().map(|symbol| symbol.range).collect();
    let mut outline = Outline::empty(generation);
    let ids: Vec<_> = symbols
        .into_iter()
        .map(|symbol| outline.push(symbol))
        .collect();

    // Quadratic scan over the candidate pool; n is one document's declarations.
    for (index, id) in ids.iter().enumerate() {
        let parent = match enclosing_parent(&ranges, index) {
            Some(parent) => ids[parent],
            None => outline.root(),
        };
        outline.attach(parent, *id);
    }

    outline
}

/// Index of the tightest range that strictly encloses `ranges[child]`
///
/// Candidates contain the child without being equal to it. The winner has the
/// latest start, then the earliest end; candidates with identical ranges go to
/// the one listed first. Empty ranges never enclose and are never enclosed.
fn enclosing_parent(ranges: &[Range], child: usize) -> Option<usize> {
    let target = &ranges[child];
    if target.is_empty() {
        return None;
    }

    let mut best: Option<usize> = None;
    for (index, candidate) in ranges.iter().enumerate() {
        if index == child
            || candidate.is_empty()
            || candidate == target
            || !candidate.contains(target)
        {
            continue;
        }

        match best {
            Some(current) if !is_tighter(candidate, &ranges[current]) => {}
            _ => best = Some(index),
        }
    }

    best
}

/// Later start wins; on equal starts the earlier end wins
fn is_tighter(candidate: &Range, current: &Range) -> bool {
    candidate.start > current.start
        || (candidate.start == current.start && candidate.end < current.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutlineSettings;
    use crate::outline::{NodeId, Position, SymbolKind};

    fn sym(name: &str, kind: SymbolKind, start: u32, end: u32) -> SymbolRecord {
        SymbolRecord::new(name, kind, Range::lines(start, end))
    }

    fn names(outline: &Outline, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| outline.symbol(*id).unwrap().name.clone())
            .collect()
    }

    fn find(outline: &Outline, name: &str) -> NodeId {
        outline
            .descendants()
            .into_iter()
            .find(|id| outline.symbol(*id).unwrap().name == name)
            .unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_forest() {
        let outline = build_outline(Vec::new(), &ConfigSnapshot::default(), 1);
        assert!(outline.is_empty());
        assert_eq!(outline.generation(), 1);
    }

    #[test]
    fn test_containment_nesting() {
        let symbols = vec![
            sym("Foo", SymbolKind::Class, 0, 50),
            sym("bar", SymbolKind::Method, 5, 10),
            sym("baz", SymbolKind::Method, 12, 40),
            sym("qux", SymbolKind::Function, 60, 70),
        ];
        let outline = build_outline(symbols, &ConfigSnapshot::default(), 0);

        let roots = outline.children(outline.root());
        assert_eq!(names(&outline, roots), vec!["Foo", "qux"]);
        assert_eq!(names(&outline, outline.children(roots[0])), vec!["bar", "baz"]);
        assert!(outline.children(roots[1]).is_empty());
    }

    #[test]
    fn test_tightest_parent_in_any_order() {
        let a = sym("A", SymbolKind::Class, 0, 100);
        let b = sym("B", SymbolKind::Method, 10, 50);
        let c = sym("C", SymbolKind::Variable, 20, 30);
        let orders = [
            [&a, &b, &c],
            [&a, &c, &b],
            [&b, &a, &c],
            [&b, &c, &a],
            [&c, &a, &b],
            [&c, &b, &a],
        ];

        for order in orders {
            let symbols = order.iter().map(|s| (*s).clone()).collect();
            let outline = build_outline(symbols, &ConfigSnapshot::default(), 0);
            let (a_id, b_id, c_id) = (find(&outline, "A"), find(&outline, "B"), find(&outline, "C"));
            assert_eq!(outline.parent(c_id), Some(b_id));
            assert_eq!(outline.parent(b_id), Some(a_id));
            assert_eq!(outline.parent(a_id), Some(outline.root()));
        }
    }

    #[test]
    fn test_equal_start_prefers_earlier_end() {
        let symbols = vec![
            sym("wide", SymbolKind::Class, 0, 40),
            sym("narrow", SymbolKind::Class, 0, 20),
            sym("inner", SymbolKind::Method, 5, 10),
        ];
        let outline = build_outline(symbols, &ConfigSnapshot::default(), 0);
        let inner = find(&outline, "inner");
        let narrow = find(&outline, "narrow");
        assert_eq!(outline.parent(inner), Some(narrow));
        assert_eq!(outline.parent(narrow), Some(find(&outline, "wide")));
    }

    #[test]
    fn test_identical_ranges_are_siblings() {
        let symbols = vec![
            sym("first", SymbolKind::Function, 0, 10),
            sym("second", SymbolKind::Function, 0, 10),
            sym("inner", SymbolKind::Variable, 2, 3),
        ];
        let outline = build_outline(symbols, &ConfigSnapshot::default(), 0);
        assert_eq!(
            names(&outline, outline.children(outline.root())),
            vec!["first", "second"]
        );
        // Ties between identical candidates go to the first listed
        assert_eq!(
            outline.parent(find(&outline, "inner")),
            Some(find(&outline, "first"))
        );
    }

    #[test]
    fn test_empty_range_becomes_root_child() {
        let caret = SymbolRecord::new(
            "marker",
            SymbolKind::Constant,
            Range::caret(Position::new(5, 0)),
        );
        let symbols = vec![sym("Foo", SymbolKind::Class, 0, 50), caret];
        let outline = build_outline(symbols, &ConfigSnapshot::default(), 0);
        assert_eq!(
            names(&outline, outline.children(outline.root())),
            vec!["Foo", "marker"]
        );
    }

    #[test]
    fn test_container_names_are_ignored() {
        let symbols = vec![
            sym("Foo", SymbolKind::Class, 0, 10),
            sym("Bar", SymbolKind::Class, 20, 30),
            // Claims to live in Foo but its range is inside Bar
            sym("method", SymbolKind::Method, 22, 25).with_container("Foo"),
            sym("orphan", SymbolKind::Method, 40, 45).with_container("Missing"),
        ];
        let outline = build_outline(symbols, &ConfigSnapshot::default(), 0);
        assert_eq!(
            outline.parent(find(&outline, "method")),
            Some(find(&outline, "Bar"))
        );
        assert_eq!(outline.parent(find(&outline, "orphan")), Some(outline.root()));
    }

    #[test]
    fn test_top_level_is_a_pre_filter() {
        let settings = OutlineSettings {
            top_level: vec!["Class".to_string()],
            ..OutlineSettings::default()
        };
        let config = ConfigSnapshot::resolve(&settings);
        let symbols = vec![
            sym("Foo", SymbolKind::Class, 0, 50),
            sym("bar", SymbolKind::Method, 5, 10),
            sym("Inner", SymbolKind::Class, 6, 8),
        ];
        let outline = build_outline(symbols, &config, 0);

        assert_eq!(outline.len(), 2);
        let foo = find(&outline, "Foo");
        // The method is gone entirely, so Inner attaches straight to Foo
        assert_eq!(names(&outline, outline.children(foo)), vec!["Inner"]);
    }

    #[test]
    fn test_parents_strictly_contain_children() {
        let symbols = vec![
            sym("a", SymbolKind::Module, 0, 100),
            sym("b", SymbolKind::Class, 0, 100),
            sym("c", SymbolKind::Class, 10, 60),
            sym("d", SymbolKind::Method, 10, 20),
            sym("e", SymbolKind::Method, 30, 60),
            sym("f", SymbolKind::Variable, 35, 36),
            sym("g", SymbolKind::Function, 70, 90),
        ];
        let outline = build_outline(symbols, &ConfigSnapshot::default(), 0);

        for id in outline.descendants() {
            let range = outline.symbol(id).unwrap().range;
            let parent = outline.parent(id).unwrap();
            if let Some(parent_symbol) = outline.symbol(parent) {
                assert!(parent_symbol.range.contains(&range));
                assert_ne!(parent_symbol.range, range);
            }
            assert!(!outline.ancestors(id).any(|ancestor| ancestor == id));
        }
        assert_eq!(outline.descendants().len(), 7);
    }
}
