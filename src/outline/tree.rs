//! Arena-backed outline forest

use std::cmp::Ordering;

use super::{Position, SymbolRecord};

/// Handle to a node of one particular forest
///
/// Ids carry the generation of the forest that issued them. A forest rejects
/// ids from any other generation, so handles held across a rebuild resolve to
/// nothing instead of to an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    generation: u64,
    index: usize,
}

impl NodeId {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A single node in the outline tree
#[derive(Debug, Clone)]
pub struct OutlineNode {
    /// `None` only for the synthetic root
    pub symbol: Option<SymbolRecord>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl OutlineNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node has children (can be expanded/collapsed)
    pub fn is_collapsible(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Complete outline for a document
///
/// Nodes live in a flat arena. Parents own their children through the child
/// list; the parent link on a child is a plain id and never keeps anything alive.
#[derive(Debug, Clone)]
pub struct Outline {
    generation: u64,
    nodes: Vec<OutlineNode>,
}

impl Outline {
    /// Create an outline holding only the synthetic root
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            nodes: vec![OutlineNode {
                symbol: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn root(&self) -> NodeId {
        self.id(0)
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root()
    }

    /// Check if the outline has any symbols
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of symbol nodes (the root is not counted)
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Resolve an id issued by this forest
    pub fn node(&self, id: NodeId) -> Option<&OutlineNode> {
        if id.generation != self.generation {
            return None;
        }
        self.nodes.get(id.index)
    }

    pub fn symbol(&self, id: NodeId) -> Option<&SymbolRecord> {
        self.node(id).and_then(|node| node.symbol.as_ref())
    }

    /// Children of `id`, empty for unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(OutlineNode::children).unwrap_or(&[])
    }

    /// Parent of `id`; root children report the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(OutlineNode::parent)
    }

    /// Iterate from `id`'s parent up to and including the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// All symbol nodes in pre-order, children in their current order
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.children(self.root()).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Deepest node whose range contains `position`
    ///
    /// Descends from the root. At each level the first child (in current
    /// order) containing the position is followed; overlapping siblings only
    /// happen with malformed provider output. Returns `None` when no root
    /// child contains the position.
    pub fn node_at_position(&self, position: Position) -> Option<NodeId> {
        let mut current = self.root();
        let mut found = None;

        loop {
            let next = self.children(current).iter().copied().find(|child| {
                self.symbol(*child)
                    .is_some_and(|symbol| symbol.range.contains_position(position))
            });

            match next {
                Some(child) => {
                    found = Some(child);
                    current = child;
                }
                None => return found,
            }
        }
    }

    fn id(&self, index: usize) -> NodeId {
        NodeId {
            generation: self.generation,
            index,
        }
    }

    /// Add a detached node wrapping `symbol`
    pub(crate) fn push(&mut self, symbol: SymbolRecord) -> NodeId {
        let id = self.id(self.nodes.len());
        self.nodes.push(OutlineNode {
            symbol: Some(symbol),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` to `parent`'s children
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert_ne!(parent, child);
        self.nodes[child.index].parent = Some(parent);
        self.nodes[parent.index].children.push(child);
    }

    /// Stable-sort every child list (root included) with `compare`
    pub(crate) fn sort_children_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&SymbolRecord, &SymbolRecord) -> Ordering,
    {
        for index in 0..self.nodes.len() {
            if self.nodes[index].children.len() < 2 {
                continue;
            }
            let mut children = std::mem::take(&mut self.nodes[index].children);
            let nodes = &self.nodes;
            children.sort_by(|a, b| {
                match (nodes[a.index].symbol.as_ref(), nodes[b.index].symbol.as_ref()) {
                    (Some(a), Some(b)) => compare(a, b),
                    _ => Ordering::Equal,
                }
            });
            self.nodes[index].children = children;
        }
    }
}
