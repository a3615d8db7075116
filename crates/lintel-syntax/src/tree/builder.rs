//! Bottom-up construction of [`Tree`] arenas.

use std::ops::Range;

use super::{NodeData, NodeId, NodeKind, Tree};
use crate::error::SyntaxError;
use crate::position::LineIndex;

/// Builds a [`Tree`] from the leaves up.
///
/// Children must be pushed before their parent, and each node may be
/// adopted by at most one parent. [`TreeBuilder::finish`] takes the root.
/// The Ruby parser uses this builder; hosts bringing their own parser can
/// use it the same way.
///
/// # Example
///
/// ```
/// use lintel_syntax::{NodeKind, TreeBuilder};
///
/// let source = "foo";
/// let mut builder = TreeBuilder::new(source);
/// let method = builder.leaf(NodeKind::Ident, 0..3, "foo")?;
/// let call = builder.node(NodeKind::Call, 0..3, vec![None, Some(method)])?;
/// let root = builder.node(NodeKind::Program, 0..3, vec![Some(call)])?;
/// let tree = builder.finish(root)?;
/// assert_eq!(tree.root().kind(), NodeKind::Program);
/// # Ok::<(), lintel_syntax::SyntaxError>(())
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    source: String,
    lines: LineIndex,
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    /// Creates a builder for the given source text.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            lines: LineIndex::new(source),
            nodes: Vec::new(),
        }
    }

    /// Returns the source text being built against.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Pushes a leaf carrying a literal value.
    ///
    /// # Errors
    ///
    /// Returns an error if `range` is not a valid range of the source.
    pub fn leaf(
        &mut self,
        kind: NodeKind,
        range: Range<usize>,
        value: impl Into<String>,
    ) -> Result<NodeId, SyntaxError> {
        self.push(kind, range, Some(value.into()), Vec::new())
    }

    /// Pushes an interior node with the given slots.
    ///
    /// # Errors
    ///
    /// Returns an error if `range` is invalid or a slot refers to an unknown
    /// or already adopted node.
    pub fn node(
        &mut self,
        kind: NodeKind,
        range: Range<usize>,
        slots: Vec<Option<NodeId>>,
    ) -> Result<NodeId, SyntaxError> {
        self.push(kind, range, None, slots)
    }

    /// Pushes a node with an optional value and slots.
    ///
    /// # Errors
    ///
    /// Returns an error if `range` is not a valid, character-aligned range of
    /// the source, or if any slot refers to an unknown or already adopted
    /// node.
    pub fn push(
        &mut self,
        kind: NodeKind,
        range: Range<usize>,
        value: Option<String>,
        slots: Vec<Option<NodeId>>,
    ) -> Result<NodeId, SyntaxError> {
        self.check_range(&range)?;

        let id = NodeId(self.nodes.len());
        for child in slots.iter().flatten() {
            let Some(data) = self.nodes.get_mut(child.0) else {
                return Err(SyntaxError::invalid_tree(format!(
                    "{kind} node refers to unknown child #{}",
                    child.0
                )));
            };
            if data.parent.is_some() {
                return Err(SyntaxError::invalid_tree(format!(
                    "node #{} already has a parent",
                    child.0
                )));
            }
            data.parent = Some(id);
        }

        self.nodes.push(NodeData {
            kind,
            span: self.lines.span(range.start, range.end),
            value,
            slots,
            parent: None,
        });
        Ok(id)
    }

    /// Finishes the tree with `root` as its root node.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is unknown or was adopted by another node.
    pub fn finish(self, root: NodeId) -> Result<Tree, SyntaxError> {
        match self.nodes.get(root.0) {
            None => Err(SyntaxError::invalid_tree(format!(
                "root #{} was never pushed",
                root.0
            ))),
            Some(data) if data.parent.is_some() => Err(SyntaxError::invalid_tree(format!(
                "root #{} has a parent",
                root.0
            ))),
            Some(_) => Ok(Tree {
                source: self.source,
                nodes: self.nodes,
                root,
            }),
        }
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), SyntaxError> {
        let in_bounds = range.start <= range.end && range.end <= self.source.len();
        if !in_bounds
            || !self.source.is_char_boundary(range.start)
            || !self.source.is_char_boundary(range.end)
        {
            return Err(SyntaxError::invalid_tree(format!(
                "range {range:?} is not valid for source of length {}",
                self.source.len()
            )));
        }
        Ok(())
    }
}
