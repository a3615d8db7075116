//! Locations of nodes within their source text.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A zero-based line and byte column.
///
/// Columns count bytes from the start of the line, as Tree-sitter does.
///
/// # Example
///
/// ```
/// use lintel_syntax::LineCol;
///
/// let pos = LineCol::new(1, 2);
/// assert_eq!(pos.one_based(), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineCol {
    line: u32,
    column: u32,
}

impl LineCol {
    /// Creates a position from zero-based components.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns the zero-based line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the zero-based byte column.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns `(line, column)` counted from one, as editors display them.
    #[must_use]
    pub const fn one_based(&self) -> (u32, u32) {
        (self.line.saturating_add(1), self.column.saturating_add(1))
    }
}

/// The region of source a node covers.
///
/// `start_byte..end_byte` is half-open. `start` and `end` give the same
/// bounds as line and column.
///
/// # Example
///
/// ```
/// use lintel_syntax::{LineCol, Span};
///
/// let span = Span::new(13, 17, LineCol::new(0, 13), LineCol::new(0, 17));
/// assert_eq!(span.byte_range(), 13..17);
/// assert!(!span.is_multiline());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    start_byte: usize,
    end_byte: usize,
    start: LineCol,
    end: LineCol,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(start_byte: usize, end_byte: usize, start: LineCol, end: LineCol) -> Self {
        Self {
            start_byte,
            end_byte,
            start,
            end,
        }
    }

    /// Returns the first byte covered.
    #[must_use]
    pub const fn start_byte(&self) -> usize {
        self.start_byte
    }

    /// Returns the byte just past the end.
    #[must_use]
    pub const fn end_byte(&self) -> usize {
        self.end_byte
    }

    /// Returns where the span starts.
    #[must_use]
    pub const fn start(&self) -> &LineCol {
        &self.start
    }

    /// Returns where the span ends.
    #[must_use]
    pub const fn end(&self) -> &LineCol {
        &self.end
    }

    /// Returns the covered bytes as a range for slicing the source.
    #[must_use]
    pub const fn byte_range(&self) -> Range<usize> {
        self.start_byte..self.end_byte
    }

    /// Returns `true` when the span crosses a line break.
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}
