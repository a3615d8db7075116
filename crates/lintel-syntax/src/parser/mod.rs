//! Tree-sitter Ruby parsing with error recovery.
//!
//! This module wraps the Tree-sitter Ruby grammar and lowers its concrete
//! syntax tree into the arena [`Tree`] that patterns and cops consume.
//! Syntax errors are reported alongside the tree rather than failing the
//! parse, since Tree-sitter always recovers.

mod lower;

use std::ops::Range;

use serde::Serialize;

use crate::error::SyntaxError;
use crate::position::point_to_one_based;
use crate::tree::Tree;

/// Result of parsing Ruby source code.
///
/// Contains the lowered tree along with any syntax errors Tree-sitter
/// recovered from.
#[derive(Debug)]
pub struct ParseResult {
    tree: Tree,
    errors: Vec<SyntaxErrorInfo>,
}

impl ParseResult {
    /// Returns the lowered syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Consumes the result, returning the syntax tree.
    #[must_use]
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Returns the source code that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        self.tree.source()
    }

    /// Returns whether the parse result contains any syntax errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the syntax errors found while parsing.
    #[must_use]
    pub fn errors(&self) -> &[SyntaxErrorInfo] {
        &self.errors
    }
}

/// Longest source excerpt kept in [`SyntaxErrorInfo::context`], in chars.
const CONTEXT_CHARS: usize = 48;

/// A region Tree-sitter could not parse.
///
/// The parser recovers from errors, so these accompany a complete tree
/// instead of replacing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxErrorInfo {
    /// Bytes covered by the error node.
    pub byte_range: Range<usize>,
    /// One-based line of the first byte.
    pub line: u32,
    /// One-based byte column of the first byte.
    pub column: u32,
    /// The offending source, shortened to a single excerpt.
    pub context: String,
    /// What went wrong, e.g. `missing end`.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "unexpected input".to_owned()
        };

        Self {
            byte_range: node.byte_range(),
            line,
            column,
            context: excerpt(source.get(node.byte_range()).unwrap_or_default()),
            message,
        }
    }
}

fn excerpt(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() <= CONTEXT_CHARS && first_line.len() == text.len() {
        return text.to_owned();
    }
    let mut shortened: String = first_line.chars().take(CONTEXT_CHARS).collect();
    shortened.push_str("...");
    shortened
}

/// Tree-sitter parser configured for Ruby.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Creates a new Ruby parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter parser rejects the grammar, which
    /// indicates an ABI mismatch between `tree-sitter` and the grammar crate.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_ruby::LANGUAGE.into())
            .map_err(|err| SyntaxError::parser_init(err.to_string()))?;

        Ok(Self { inner })
    }

    /// Parses Ruby source code and lowers it into a [`Tree`].
    ///
    /// # Errors
    ///
    /// Returns an error if Tree-sitter fails to produce a tree, or if the
    /// lowered tree violates the arena invariants (a bug in the lowering).
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let ts_tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("tree-sitter returned no tree"))?;

        let root = ts_tree.root_node();
        let mut errors = Vec::new();
        collect_error_nodes(root, source, &mut errors);
        let tree = lower::lower(root, source)?;

        Ok(ParseResult { tree, errors })
    }
}

/// Collects `ERROR` and `MISSING` nodes, descending only into subtrees that
/// contain one.
fn collect_error_nodes(
    node: tree_sitter::Node<'_>,
    source: &str,
    errors: &mut Vec<SyntaxErrorInfo>,
) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node, source));
    }

    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, source, errors);
    }
}
