//! Parsing, inspecting, and autocorrecting whole source files.

use lintel_syntax::Parser;
use tracing::{debug, warn};

use crate::commissioner::Commissioner;
use crate::config::Config;
use crate::corrector::apply_corrections;
use crate::cop::Cop;
use crate::error::CopError;
use crate::offense::Report;
use crate::rails;

const INSPECTOR_TARGET: &str = "lintel_cops::inspector";

/// Upper bound on inspect-and-correct rounds in [`Inspector::autocorrect`].
pub const MAX_CORRECTION_PASSES: usize = 10;

/// Result of [`Inspector::autocorrect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocorrectOutcome {
    output: String,
    corrections: usize,
    passes: usize,
    remaining: Report,
}

impl AutocorrectOutcome {
    /// Returns the corrected source.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns the number of corrections applied across all passes.
    #[must_use]
    pub const fn corrections(&self) -> usize {
        self.corrections
    }

    /// Returns the number of inspection passes run.
    #[must_use]
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// Returns the offenses left in the corrected source.
    #[must_use]
    pub const fn remaining(&self) -> &Report {
        &self.remaining
    }
}

/// Runs a set of cops over source files.
///
/// # Example
///
/// ```
/// use lintel_cops::{Config, Inspector};
///
/// let mut inspector = Inspector::new(&Config::default())?;
/// let outcome = inspector.autocorrect("enum status: [:active, :archived]\n")?;
/// assert_eq!(outcome.output(), "enum :status, [:active, :archived]\n");
/// # Ok::<(), lintel_cops::CopError>(())
/// ```
pub struct Inspector {
    parser: Parser,
    commissioner: Commissioner,
}

impl Inspector {
    /// Creates an inspector running the built-in cops under `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser or a cop cannot be initialised.
    pub fn new(config: &Config) -> Result<Self, CopError> {
        Self::with_cops(rails::builtin_cops(config)?, config)
    }

    /// Creates an inspector running `cops` under `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be initialised.
    pub fn with_cops(cops: Vec<Box<dyn Cop>>, config: &Config) -> Result<Self, CopError> {
        Ok(Self {
            parser: Parser::new()?,
            commissioner: Commissioner::new(cops, config),
        })
    }

    /// Returns the commissioner dispatching to the enlisted cops.
    #[must_use]
    pub const fn commissioner(&self) -> &Commissioner {
        &self.commissioner
    }

    /// Parses and inspects `source`.
    ///
    /// Sources with syntax errors are not inspected; the errors are returned
    /// in the report instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails outright.
    pub fn inspect(&mut self, source: &str) -> Result<Report, CopError> {
        let parsed = self.parser.parse(source)?;
        if parsed.has_errors() {
            debug!(
                target: INSPECTOR_TARGET,
                errors = parsed.errors().len(),
                "skipping source with syntax errors"
            );
            return Ok(Report::new(Vec::new(), parsed.errors().to_vec()));
        }

        let offenses = self.commissioner.investigate(parsed.tree());
        debug!(
            target: INSPECTOR_TARGET,
            bytes = source.len(),
            offenses = offenses.len(),
            "inspected source"
        );
        Ok(Report::new(offenses, Vec::new()))
    }

    /// Inspects and corrects `source` until no further correction applies.
    ///
    /// Each pass applies the non-overlapping corrections of one inspection.
    /// A pass whose output no longer parses is discarded and correction stops
    /// there.
    ///
    /// # Errors
    ///
    /// Returns [`CopError::CorrectionLoop`] if corrections are still being
    /// applied after [`MAX_CORRECTION_PASSES`] passes, or any error from
    /// parsing or applying edits.
    pub fn autocorrect(&mut self, source: &str) -> Result<AutocorrectOutcome, CopError> {
        let mut current = source.to_owned();
        let mut corrections = 0_usize;

        for pass in 1..=MAX_CORRECTION_PASSES {
            let report = self.inspect(&current)?;
            let applied = apply_corrections(&current, report.offenses())?;
            if !applied.has_changes() {
                return Ok(AutocorrectOutcome {
                    output: current,
                    corrections,
                    passes: pass,
                    remaining: report,
                });
            }

            if self.parser.parse(applied.output())?.has_errors() {
                warn!(
                    target: INSPECTOR_TARGET,
                    pass,
                    "discarding corrections that produce invalid syntax"
                );
                return Ok(AutocorrectOutcome {
                    output: current,
                    corrections,
                    passes: pass,
                    remaining: report,
                });
            }

            debug!(
                target: INSPECTOR_TARGET,
                pass,
                applied = applied.applied(),
                skipped = applied.skipped(),
                "applied corrections"
            );
            corrections += applied.applied();
            current = applied.into_output();
        }

        Err(CopError::CorrectionLoop {
            passes: MAX_CORRECTION_PASSES,
        })
    }
}
