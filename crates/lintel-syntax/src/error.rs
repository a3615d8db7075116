//! Error types for syntax tree construction and pattern compilation.
//!
//! Failures in this crate are setup errors: a grammar that will not load, a
//! host-built tree that violates the arena invariants, or a pattern string
//! that does not compile. Shape mismatches during matching are never errors.

use thiserror::Error;

/// Errors from parsing, tree construction, and pattern compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser with the Ruby grammar.
    #[error("failed to initialise ruby parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// Tree-sitter produced no tree for the source.
    #[error("failed to parse ruby source: {message}")]
    ParseError {
        /// Description of the failure.
        message: String,
    },

    /// A node handed to the tree builder violates the arena invariants.
    #[error("invalid tree: {message}")]
    InvalidTree {
        /// Description of the violated invariant.
        message: String,
    },

    /// Pattern compilation failed.
    #[error("invalid pattern at offset {offset}: {message}")]
    PatternCompileError {
        /// Byte offset in the pattern source where compilation stopped.
        offset: usize,
        /// Description of the compilation failure.
        message: String,
    },

    /// The pattern compiled but declares a different number of captures
    /// than the caller asked for.
    #[error("pattern `{pattern}` declares {found} captures, expected {expected}")]
    CaptureCountMismatch {
        /// The offending pattern source.
        pattern: String,
        /// Number of captures the caller expects.
        expected: usize,
        /// Number of captures found in the pattern.
        found: usize,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Creates an invalid tree error.
    #[must_use]
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree {
            message: message.into(),
        }
    }

    /// Creates a pattern compilation error.
    #[must_use]
    pub fn pattern_compile(offset: usize, message: impl Into<String>) -> Self {
        Self::PatternCompileError {
            offset,
            message: message.into(),
        }
    }

    /// Creates a capture count mismatch error.
    #[must_use]
    pub fn capture_count(pattern: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::CaptureCountMismatch {
            pattern: pattern.into(),
            expected,
            found,
        }
    }
}
