//! Offense collection for a single cop during one traversal.

use lintel_syntax::{NodeRef, Span};
use tracing::trace;

use crate::corrector::Correction;
use crate::offense::{Offense, Severity};

const REPORTER_TARGET: &str = "lintel_cops::reporter";

/// Records offenses on behalf of one cop.
///
/// Offenses are appended in the order they are reported, which follows the
/// traversal's document order. Nothing is deduplicated.
#[derive(Debug)]
pub struct Reporter<'r> {
    cop_name: &'static str,
    severity: Severity,
    autocorrect: bool,
    sink: &'r mut Vec<Offense>,
}

impl<'r> Reporter<'r> {
    pub(crate) const fn new(
        cop_name: &'static str,
        severity: Severity,
        autocorrect: bool,
        sink: &'r mut Vec<Offense>,
    ) -> Self {
        Self {
            cop_name,
            severity,
            autocorrect,
            sink,
        }
    }

    /// Returns the name of the reporting cop.
    #[must_use]
    pub const fn cop_name(&self) -> &'static str {
        self.cop_name
    }

    /// Returns `false` when corrections will be discarded, so cops can skip
    /// building them.
    #[must_use]
    pub const fn wants_corrections(&self) -> bool {
        self.autocorrect
    }

    /// Reports an offense anchored at `anchor`.
    pub fn report(
        &mut self,
        anchor: NodeRef<'_>,
        message: impl Into<String>,
        correction: Option<Correction>,
    ) {
        self.report_span(*anchor.span(), message, correction);
    }

    /// Reports an offense anchored at an arbitrary span.
    pub fn report_span(
        &mut self,
        span: Span,
        message: impl Into<String>,
        correction: Option<Correction>,
    ) {
        let kept = correction.filter(|_| self.autocorrect);
        trace!(
            target: REPORTER_TARGET,
            cop = self.cop_name,
            line = span.start().line(),
            column = span.start().column(),
            correctable = kept.is_some(),
            "offense"
        );
        self.sink.push(Offense::new(
            self.cop_name,
            self.severity,
            message,
            span,
            kept,
        ));
    }
}
