//! Node patterns for structural matching.
//!
//! Patterns are small s-expressions compiled once, typically when a cop is
//! constructed, and then matched against many nodes.
//!
//! # Pattern Syntax
//!
//! - `(kind p1 p2 ...)` - a node of `kind` whose slots match `p1 p2 ...`
//!   exactly
//! - `(kind p1 ...)` - as above, with any number of further slots
//! - `kind` - a node of `kind`, children unconstrained
//! - `_` - any present node
//! - `nil?` - an absent slot, such as a call without a receiver
//! - `:name` - a node whose literal value is `name`
//! - `{a b}` - either alternative; alternatives cannot capture
//! - `$p` - captures the node matched by `p`
//!
//! Captures are numbered left to right, depth first, so `$(pair $_ _)`
//! yields the pair and then its key.

mod compile;
mod lexer;
mod matching;

use compile::PatternNode;

use crate::error::SyntaxError;
use crate::tree::{NodeRef, Tree};

/// A compiled structural pattern with exactly `N` captures.
///
/// The capture count is part of the type, so callers destructure results
/// without checking their length. Compilation fails if the pattern source
/// declares a different number of captures.
///
/// # Example
///
/// ```
/// use lintel_syntax::{NodePattern, Parser};
///
/// let pattern = NodePattern::<2>::compile("(pair $_ ${array hash})")?;
/// let parsed = Parser::new()?.parse("enum status: [:active, :archived]")?;
///
/// let found = pattern.find_all(parsed.tree());
/// let [key, values] = found[0].1;
/// assert_eq!(key.source(), "status");
/// assert_eq!(values.source(), "[:active, :archived]");
/// # Ok::<(), lintel_syntax::SyntaxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NodePattern<const N: usize> {
    source: String,
    root: PatternNode,
}

impl<const N: usize> NodePattern<N> {
    /// Compiles a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::PatternCompileError`] for malformed syntax or
    /// unknown node kinds, and [`SyntaxError::CaptureCountMismatch`] when the
    /// pattern does not declare exactly `N` captures.
    pub fn compile(source: &str) -> Result<Self, SyntaxError> {
        let tokens = lexer::tokenise(source)?;
        let root = compile::compile(&tokens, source.len())?;

        let found = root.capture_count();
        if found != N {
            return Err(SyntaxError::capture_count(source, N, found));
        }

        Ok(Self {
            source: source.to_owned(),
            root,
        })
    }

    /// Returns the original pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Matches the pattern against `node`, returning the captures on success.
    #[must_use]
    pub fn matches<'t>(&self, node: NodeRef<'t>) -> Option<[NodeRef<'t>; N]> {
        let mut captures = Vec::with_capacity(N);
        if !matching::match_slot(&self.root, Some(node), &mut captures) {
            return None;
        }
        captures.try_into().ok()
    }

    /// Returns `true` if the pattern matches `node`.
    #[must_use]
    pub fn is_match(&self, node: NodeRef<'_>) -> bool {
        self.matches(node).is_some()
    }

    /// Finds every matching node in the tree, in document order.
    #[must_use]
    pub fn find_all<'t>(&self, tree: &'t Tree) -> Vec<(NodeRef<'t>, [NodeRef<'t>; N])> {
        tree.preorder()
            .filter_map(|node| self.matches(node).map(|captures| (node, captures)))
            .collect()
    }

    /// Finds the first matching node in document order.
    #[must_use]
    pub fn find_first<'t>(&self, tree: &'t Tree) -> Option<(NodeRef<'t>, [NodeRef<'t>; N])> {
        tree.preorder()
            .find_map(|node| self.matches(node).map(|captures| (node, captures)))
    }
}
