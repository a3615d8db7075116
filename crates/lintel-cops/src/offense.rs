//! Offenses reported by cops and the per-file report that collects them.

use lintel_syntax::{Span, SyntaxErrorInfo};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::corrector::Correction;

/// How serious an offense is.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Code that could be structured better.
    Refactor,
    /// A style convention was not followed.
    #[default]
    Convention,
    /// Likely to cause a bug.
    Warning,
    /// Definitely wrong.
    Error,
}

/// One rule violation at one location.
///
/// # Example
///
/// ```
/// use lintel_cops::{Offense, Severity};
/// use lintel_syntax::{LineCol, Span};
///
/// let span = Span::new(0, 14, LineCol::new(0, 0), LineCol::new(0, 14));
/// let offense = Offense::new("Rails/ActiveJobInitialize", Severity::Convention, "msg", span, None);
/// assert!(!offense.is_correctable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offense {
    cop_name: String,
    severity: Severity,
    message: String,
    span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correction: Option<Correction>,
}

impl Offense {
    /// Creates an offense.
    #[must_use]
    pub fn new(
        cop_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        span: Span,
        correction: Option<Correction>,
    ) -> Self {
        Self {
            cop_name: cop_name.into(),
            severity,
            message: message.into(),
            span,
            correction,
        }
    }

    /// Returns the name of the cop that reported the offense.
    #[must_use]
    pub fn cop_name(&self) -> &str {
        &self.cop_name
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the location the offense is anchored at.
    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }

    /// Returns the correction, if one could be built safely.
    #[must_use]
    pub const fn correction(&self) -> Option<&Correction> {
        self.correction.as_ref()
    }

    /// Returns `true` if the offense carries a correction.
    #[must_use]
    pub const fn is_correctable(&self) -> bool {
        self.correction.is_some()
    }

    /// Drops the correction, keeping the offense.
    #[must_use]
    pub fn without_correction(self) -> Self {
        Self {
            correction: None,
            ..self
        }
    }
}

/// Everything found while inspecting one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    offenses: Vec<Offense>,
    syntax_errors: Vec<SyntaxErrorInfo>,
}

impl Report {
    pub(crate) const fn new(offenses: Vec<Offense>, syntax_errors: Vec<SyntaxErrorInfo>) -> Self {
        Self {
            offenses,
            syntax_errors,
        }
    }

    /// Returns the offenses in document order.
    #[must_use]
    pub fn offenses(&self) -> &[Offense] {
        &self.offenses
    }

    /// Consumes the report, returning the offenses.
    #[must_use]
    pub fn into_offenses(self) -> Vec<Offense> {
        self.offenses
    }

    /// Returns the syntax errors that prevented inspection.
    ///
    /// A file with syntax errors is not inspected, so its report carries no
    /// offenses.
    #[must_use]
    pub fn syntax_errors(&self) -> &[SyntaxErrorInfo] {
        &self.syntax_errors
    }

    /// Returns `true` if no offenses or syntax errors were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.offenses.is_empty() && self.syntax_errors.is_empty()
    }

    /// Iterates over the offenses reported by `cop_name`.
    pub fn offenses_for<'a>(&'a self, cop_name: &'a str) -> impl Iterator<Item = &'a Offense> {
        self.offenses
            .iter()
            .filter(move |offense| offense.cop_name() == cop_name)
    }
}
