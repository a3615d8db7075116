//! Arena-backed syntax tree consumed by patterns and cops.
//!
//! A [`Tree`] owns every node of one source file together with the source
//! text. Nodes refer to their children and parent by [`NodeId`], so a tree is
//! immutable once built and can be shared across threads. [`NodeRef`] is the
//! borrowed handle callers use to navigate it.
//!
//! Each node has an ordered list of *slots*. A slot is either a child node or
//! absent, which is how optional positions such as a call's receiver or a
//! class's superclass are represented; see [`NodeKind`] for the slot layout
//! of each kind.

mod builder;
mod kind;

use std::fmt;
use std::ops::Range;

pub use builder::TreeBuilder;
pub use kind::NodeKind;

use crate::span::Span;

/// Opaque index of a node within its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    span: Span,
    value: Option<String>,
    slots: Vec<Option<NodeId>>,
    parent: Option<NodeId>,
}

/// An immutable syntax tree for one source file.
#[derive(Debug, Clone)]
pub struct Tree {
    source: String,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Tree {
    /// Returns the source text the tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, self.root)
    }

    /// Looks up a node by id, returning `None` for ids from another tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no nodes. Built trees always hold at
    /// least the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node in depth-first pre-order (document order),
    /// starting with the root.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![self.root()],
        }
    }

    fn text(&self, range: Range<usize>) -> &str {
        self.source.get(range).unwrap_or_default()
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "NodeIds are only minted by the builder for nodes of the same tree"
    )]
    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// A borrowed handle to one node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t Tree,
    id: NodeId,
    data: &'t NodeData,
}

impl<'t> NodeRef<'t> {
    fn new(tree: &'t Tree, id: NodeId) -> Self {
        Self {
            tree,
            id,
            data: tree.data(id),
        }
    }

    /// Returns the node's id.
    #[must_use]
    pub const fn id(self) -> NodeId {
        self.id
    }

    /// Returns the tree this node belongs to.
    #[must_use]
    pub const fn tree(self) -> &'t Tree {
        self.tree
    }

    /// Returns the node's kind.
    #[must_use]
    pub const fn kind(self) -> NodeKind {
        self.data.kind
    }

    /// Returns `true` if the node has the given kind.
    #[must_use]
    pub fn is(self, kind: NodeKind) -> bool {
        self.data.kind == kind
    }

    /// Returns the node's source span.
    #[must_use]
    pub const fn span(self) -> &'t Span {
        &self.data.span
    }

    /// Returns the verbatim source text covered by the node.
    #[must_use]
    pub fn source(self) -> &'t str {
        self.tree.text(self.data.span.byte_range())
    }

    /// Returns the literal value of a leaf node, if it has one.
    #[must_use]
    pub fn value(self) -> Option<&'t str> {
        self.data.value.as_deref()
    }

    /// Returns the number of slots, present or absent.
    #[must_use]
    pub fn slot_count(self) -> usize {
        self.data.slots.len()
    }

    /// Returns the child in `slot`, or `None` when the slot is absent or out
    /// of range.
    #[must_use]
    pub fn child(self, slot: usize) -> Option<Self> {
        self.data
            .slots
            .get(slot)
            .copied()
            .flatten()
            .map(|id| Self::new(self.tree, id))
    }

    /// Iterates over every slot in order, yielding `None` for absent slots.
    pub fn slots(self) -> impl Iterator<Item = Option<Self>> + 't {
        let tree = self.tree;
        self.data
            .slots
            .iter()
            .map(move |slot| slot.map(|id| Self::new(tree, id)))
    }

    /// Iterates over the present children in order.
    pub fn children(self) -> impl Iterator<Item = Self> + 't {
        self.slots().flatten()
    }

    /// Returns the parent node, or `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.data.parent.map(|id| Self::new(self.tree, id))
    }

    /// Iterates over the ancestors of this node, nearest first.
    #[must_use]
    pub fn ancestors(self) -> Ancestors<'t> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Returns the nearest ancestor of the given kind.
    #[must_use]
    pub fn find_ancestor(self, kind: NodeKind) -> Option<Self> {
        self.ancestors().find(|node| node.is(kind))
    }

    /// Iterates over the strict descendants of this node in pre-order.
    #[must_use]
    pub fn descendants(self) -> Preorder<'t> {
        let mut stack: Vec<_> = self.children().collect();
        stack.reverse();
        Preorder { stack }
    }

    /// Returns `true` when the node spans more than one line.
    #[must_use]
    pub const fn is_multiline(self) -> bool {
        self.data.span.is_multiline()
    }

    /// Returns the receiver of a call or singleton method definition.
    #[must_use]
    pub fn receiver(self) -> Option<Self> {
        match self.kind() {
            NodeKind::Call | NodeKind::Defs => self.child(0),
            _ => None,
        }
    }

    /// Returns the method name of a call or method definition.
    #[must_use]
    pub fn method_name(self) -> Option<&'t str> {
        let name = match self.kind() {
            NodeKind::Def => self.child(0),
            NodeKind::Call | NodeKind::Defs => self.child(1),
            _ => None,
        };
        name.and_then(Self::value)
    }

    /// Iterates over the arguments of a call, including a trailing block.
    pub fn arguments(self) -> impl Iterator<Item = Self> + 't {
        let skip = if self.is(NodeKind::Call) {
            2
        } else {
            self.slot_count()
        };
        self.slots().skip(skip).flatten()
    }

    /// Returns the superclass expression of a class definition.
    #[must_use]
    pub fn superclass(self) -> Option<Self> {
        if self.is(NodeKind::Class) {
            self.child(1)
        } else {
            None
        }
    }

    /// Returns the full name of a constant reference, e.g. `Jobs::Base`.
    #[must_use]
    pub fn const_name(self) -> Option<&'t str> {
        if self.is(NodeKind::Const) {
            self.value()
        } else {
            None
        }
    }

    /// Returns the key of a pair.
    #[must_use]
    pub fn pair_key(self) -> Option<Self> {
        if self.is(NodeKind::Pair) {
            self.child(0)
        } else {
            None
        }
    }

    /// Returns the value of a pair.
    #[must_use]
    pub fn pair_value(self) -> Option<Self> {
        if self.is(NodeKind::Pair) {
            self.child(1)
        } else {
            None
        }
    }

    /// Iterates over the `pair` children of a hash.
    pub fn pairs(self) -> impl Iterator<Item = Self> + 't {
        let is_hash = self.is(NodeKind::Hash);
        self.children()
            .filter(move |child| is_hash && child.is(NodeKind::Pair))
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("kind", &self.kind())
            .field("bytes", &self.span().byte_range())
            .field("source", &self.source())
            .finish()
    }
}

/// Iterator over a node's ancestors, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<'t> {
    next: Option<NodeRef<'t>>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Depth-first pre-order iterator over nodes.
#[derive(Debug, Clone)]
pub struct Preorder<'t> {
    stack: Vec<NodeRef<'t>>,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(node.children());
        if let Some(pushed) = self.stack.get_mut(start..) {
            pushed.reverse();
        }
        Some(node)
    }
}
