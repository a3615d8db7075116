//! Building and applying source corrections.
//!
//! A cop describes a fix with a [`Corrector`], which collects edits against
//! the original source and yields a [`Correction`] only when the edits are
//! safe to apply together. The host then merges the corrections of one
//! inspection pass with [`apply_corrections`].

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::CopError;
use crate::offense::Offense;

const CORRECTOR_TARGET: &str = "lintel_cops::corrector";

/// Replacement of one byte range of the original source.
///
/// An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

impl Edit {
    /// Creates an edit replacing `range` with `replacement`.
    #[must_use]
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            replacement: replacement.into(),
        }
    }

    /// Returns the inclusive start byte offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the exclusive end byte offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the replaced byte range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Returns `true` if the edit inserts text without removing any.
    #[must_use]
    pub const fn is_insertion(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if applying both edits would be order dependent.
    ///
    /// Two insertions at the same offset, or an insertion at the start of a
    /// replaced range, count as overlapping.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        if self.start == other.start && (self.is_insertion() || other.is_insertion()) {
            return true;
        }
        self.start < other.end && other.start < self.end
    }
}

/// A set of non-overlapping edits that together fix one offense.
///
/// Edits are kept sorted by start offset and always refer to the original
/// source, never to a partially edited buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    edits: Vec<Edit>,
}

impl Correction {
    /// Returns the edits in source order.
    #[must_use]
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Returns the smallest byte range covering every edit.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = self.edits.first().map_or(0, Edit::start);
        let end = self.edits.iter().map(Edit::end).max().unwrap_or(start);
        start..end
    }

    /// Returns `true` if any edit of `self` overlaps any edit of `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.edits
            .iter()
            .any(|edit| other.edits.iter().any(|theirs| edit.overlaps(theirs)))
    }

    /// Applies this correction alone to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`CopError::Rewrite`] if an edit falls outside the source or
    /// splits a UTF-8 character.
    pub fn apply(&self, source: &str) -> Result<String, CopError> {
        apply_edits(source, self.edits.iter())
    }
}

/// Collects edits for one correction.
///
/// # Example
///
/// ```
/// use lintel_cops::Corrector;
///
/// let mut corrector = Corrector::new();
/// corrector.replace(0..6, "enum");
/// corrector.replace(5..11, ":status");
/// assert!(corrector.build().is_none());
///
/// let mut corrector = Corrector::new();
/// corrector.replace(5..11, ":status");
/// let correction = corrector.build().expect("non-overlapping edits");
/// assert_eq!(correction.apply("enum status")?, "enum :status");
/// # Ok::<(), lintel_cops::CopError>(())
/// ```
#[derive(Debug, Default)]
pub struct Corrector {
    edits: Vec<Edit>,
    withheld: Option<&'static str>,
}

impl Corrector {
    /// Creates an empty corrector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces `range` with `text`.
    pub fn replace(&mut self, range: Range<usize>, text: impl Into<String>) -> &mut Self {
        self.edits.push(Edit::new(range, text));
        self
    }

    /// Removes `range`.
    pub fn remove(&mut self, range: Range<usize>) -> &mut Self {
        self.replace(range, String::new())
    }

    /// Inserts `text` immediately before `range`.
    pub fn insert_before(&mut self, range: Range<usize>, text: impl Into<String>) -> &mut Self {
        self.replace(range.start..range.start, text)
    }

    /// Inserts `text` immediately after `range`.
    pub fn insert_after(&mut self, range: Range<usize>, text: impl Into<String>) -> &mut Self {
        self.replace(range.end..range.end, text)
    }

    /// Marks the rewrite as unsafe; [`build`](Self::build) will return `None`.
    pub fn withhold(&mut self, reason: &'static str) -> &mut Self {
        self.withheld.get_or_insert(reason);
        self
    }

    /// Returns `true` if [`withhold`](Self::withhold) was called.
    #[must_use]
    pub const fn is_withheld(&self) -> bool {
        self.withheld.is_some()
    }

    /// Finishes the correction.
    ///
    /// Returns `None` if no edits were recorded, the correction was
    /// withheld, or two edits overlap.
    #[must_use]
    pub fn build(self) -> Option<Correction> {
        if let Some(reason) = self.withheld {
            trace!(target: CORRECTOR_TARGET, reason, "correction withheld");
            return None;
        }
        if self.edits.is_empty() {
            return None;
        }

        let mut edits = self.edits;
        edits.sort_by_key(|edit| (edit.start, edit.end));
        let clash = edits
            .iter()
            .enumerate()
            .any(|(index, edit)| edits.iter().skip(index + 1).any(|other| edit.overlaps(other)));
        if clash {
            trace!(target: CORRECTOR_TARGET, "correction withheld: overlapping edits");
            return None;
        }
        Some(Correction { edits })
    }
}

/// Result of applying the corrections gathered in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionOutcome {
    output: String,
    applied: usize,
    skipped: usize,
}

impl CorrectionOutcome {
    /// Returns the corrected source.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the outcome, returning the corrected source.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns the number of corrections applied.
    #[must_use]
    pub const fn applied(&self) -> usize {
        self.applied
    }

    /// Returns the number of corrections skipped because they overlapped a
    /// correction accepted earlier in the pass.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns `true` if any correction was applied.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.applied > 0
    }
}

/// Applies every correction carried by `offenses` to `source` in one pass.
///
/// Corrections are accepted in offense order. One that overlaps a correction
/// already accepted is skipped and left for a later pass.
///
/// # Errors
///
/// Returns [`CopError::Rewrite`] if an accepted edit falls outside the
/// source or splits a UTF-8 character.
pub fn apply_corrections<'a>(
    source: &str,
    offenses: impl IntoIterator<Item = &'a Offense>,
) -> Result<CorrectionOutcome, CopError> {
    let mut accepted: Vec<&Correction> = Vec::new();
    let mut skipped = 0_usize;

    for offense in offenses {
        let Some(correction) = offense.correction() else {
            continue;
        };
        if accepted.iter().any(|prior| prior.overlaps(correction)) {
            warn!(
                target: CORRECTOR_TARGET,
                cop = offense.cop_name(),
                line = offense.span().start().line(),
                "skipping correction that overlaps an earlier one"
            );
            skipped += 1;
            continue;
        }
        accepted.push(correction);
    }

    let output = apply_edits(source, accepted.iter().flat_map(|c| c.edits()))?;
    Ok(CorrectionOutcome {
        output,
        applied: accepted.len(),
        skipped,
    })
}

/// Applies non-overlapping edits from the end of the source backwards so
/// earlier offsets stay valid.
fn apply_edits<'a>(
    source: &str,
    edits: impl Iterator<Item = &'a Edit>,
) -> Result<String, CopError> {
    let mut sorted: Vec<&Edit> = edits.collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut result = source.to_owned();
    for edit in sorted {
        if edit.start > edit.end || edit.end > source.len() {
            return Err(CopError::rewrite(format!(
                "edit {}..{} is outside the {}-byte source",
                edit.start,
                edit.end,
                source.len()
            )));
        }
        if !source.is_char_boundary(edit.start) || !source.is_char_boundary(edit.end) {
            return Err(CopError::rewrite(format!(
                "edit {}..{} is not on a UTF-8 boundary",
                edit.start, edit.end
            )));
        }
        result.replace_range(edit.range(), &edit.replacement);
    }
    Ok(result)
}
