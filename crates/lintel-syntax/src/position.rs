//! Byte offset to line/column conversion.
//!
//! Tree-sitter reports positions for the nodes it produces, but the arena
//! also holds synthetic nodes (grouped keyword arguments) and trees built
//! by hosts without Tree-sitter, so spans are derived from byte offsets.

use crate::span::{LineCol, Span};

/// Precomputed line start offsets for a source string.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(offset, _)| offset.saturating_add(1)),
        );
        Self { line_starts }
    }

    /// Converts a byte offset into a zero-based line and byte column.
    pub(crate) fn line_col(&self, offset: usize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or_default();
        LineCol::new(to_u32(line), to_u32(offset.saturating_sub(line_start)))
    }

    pub(crate) fn span(&self, start_byte: usize, end_byte: usize) -> Span {
        Span::new(
            start_byte,
            end_byte,
            self.line_col(start_byte),
            self.line_col(end_byte),
        )
    }
}

// Line/column numbers will realistically never exceed u32::MAX.
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Converts a Tree-sitter position (0-based) to one-based display coordinates.
#[must_use]
pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    let line = to_u32(pos.row.saturating_add(1));
    let column = to_u32(pos.column.saturating_add(1));
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(3, 0, 3)]
    #[case(4, 1, 0)]
    #[case(6, 1, 2)]
    #[case(7, 2, 0)]
    #[case(8, 3, 0)]
    fn line_col_tracks_newlines(#[case] offset: usize, #[case] line: u32, #[case] column: u32) {
        let index = LineIndex::new("abc\nde\n\nf");
        assert_eq!(index.line_col(offset), LineCol::new(line, column));
    }

    #[test]
    fn span_marks_multiline_ranges() {
        let index = LineIndex::new("a\nb");
        assert!(index.span(0, 3).is_multiline());
        assert!(!index.span(0, 1).is_multiline());
    }
}
