//! Code outline construction
//!
//! Turns a flat list of symbol declarations (name, kind, source range) into a
//! nested forest by range containment, then orders siblings by the configured
//! kind priority and name. Used by the outline model to serve a sidebar tree.

mod build;
mod kind;
mod sort;
mod tree;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use build::build_outline;
pub use kind::{SymbolKind, UnknownKind};
pub use sort::sort_outline;
pub use tree::{NodeId, Outline, OutlineNode};

/// A position in the document (line/character are 0-based)
///
/// Ordered by line, then character.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for humans
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// A range in the document, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RangeRepr")]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

#[derive(Deserialize)]
struct RangeRepr {
    start: Position,
    end: Position,
}

impl From<RangeRepr> for Range {
    fn from(repr: RangeRepr) -> Self {
        Range::new(repr.start, repr.end)
    }
}

impl Range {
    /// Create a range, swapping the ends if they are given in reverse
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Range covering whole lines `start_line..=end_line` at column 0
    pub fn lines(start_line: u32, end_line: u32) -> Self {
        Self::new(Position::new(start_line, 0), Position::new(end_line, 0))
    }

    /// Zero-width range at `position`
    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// A range with no extent
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Non-strict containment: `other` lies within `self`, edges included
    pub fn contains(&self, other: &Range) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether `position` lies within the range, edges included
    pub fn contains_position(&self, position: Position) -> bool {
        position >= self.start && position <= self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A single symbol declaration as reported by a symbol provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRecord {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
    /// Declared container. Advisory only; nesting is derived from ranges.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub container_name: String,
}

impl SymbolRecord {
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            container_name: String::new(),
        }
    }

    pub fn with_container(mut self, container_name: impl Into<String>) -> Self {
        self.container_name = container_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering_is_line_then_character() {
        assert!(Position::new(1, 0) > Position::new(0, 99));
        assert!(Position::new(3, 4) < Position::new(3, 5));
        assert_eq!(Position::new(2, 2), Position::new(2, 2));
    }

    #[test]
    fn test_position_display_is_one_indexed() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
        assert_eq!(Position::new(9, 4).to_string(), "10:5");
    }

    #[test]
    fn test_range_new_normalizes_reversed_ends() {
        let range = Range::new(Position::new(10, 0), Position::new(2, 3));
        assert_eq!(range.start, Position::new(2, 3));
        assert_eq!(range.end, Position::new(10, 0));
    }

    #[test]
    fn test_range_containment_includes_edges() {
        let outer = Range::lines(0, 50);
        assert!(outer.contains(&Range::lines(5, 10)));
        assert!(outer.contains(&Range::lines(0, 50)));
        assert!(outer.contains(&Range::lines(0, 10)));
        assert!(!outer.contains(&Range::lines(40, 60)));
        assert!(!Range::lines(5, 10).contains(&outer));
    }

    #[test]
    fn test_range_contains_position() {
        let range = Range::new(Position::new(2, 4), Position::new(5, 1));
        assert!(range.contains_position(Position::new(2, 4)));
        assert!(range.contains_position(Position::new(3, 0)));
        assert!(range.contains_position(Position::new(5, 1)));
        assert!(!range.contains_position(Position::new(2, 3)));
        assert!(!range.contains_position(Position::new(5, 2)));
    }

    #[test]
    fn test_empty_range() {
        assert!(Range::caret(Position::new(4, 4)).is_empty());
        assert!(!Range::lines(4, 5).is_empty());
    }

    #[test]
    fn test_symbol_record_from_json() {
        let json = r#"{
            "name": "Foo",
            "kind": "Class",
            "range": { "start": { "line": 7, "character": 0 }, "end": { "line": 2, "character": 1 } },
            "containerName": "mod"
        }"#;
        let symbol: SymbolRecord = serde_json::from_str(json).unwrap();
        assert_eq!(symbol.name, "Foo");
        assert_eq!(symbol.kind, SymbolKind::Class);
        assert_eq!(symbol.container_name, "mod");
        // Reversed ends are normalized on the way in
        assert_eq!(symbol.range.start, Position::new(2, 1));
    }

    #[test]
    fn test_symbol_record_container_name_is_optional() {
        let yaml = "name: bar\nkind: Method\nrange:\n  start: { line: 1, character: 0 }\n  end: { line: 3, character: 0 }\n";
        let symbol: SymbolRecord = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(symbol, SymbolRecord::new("bar", SymbolKind::Method, Range::lines(1, 3)));
    }
}
