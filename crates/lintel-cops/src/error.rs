//! Error types for cop setup, configuration, and correction application.
//!
//! Offenses and withheld corrections are data, not errors. The variants here
//! cover setup mistakes (a cop whose patterns do not compile, unreadable
//! configuration) and host-side failures while applying edits.

use lintel_syntax::SyntaxError;
use thiserror::Error;

/// Errors from the cop layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CopError {
    /// Parsing or tree construction failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A cop could not be constructed because one of its patterns failed to
    /// compile.
    #[error("failed to set up cop {cop}: {source}")]
    Setup {
        /// Name of the cop being constructed.
        cop: &'static str,
        /// The underlying pattern error.
        #[source]
        source: SyntaxError,
    },

    /// The configuration document could not be read.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// A Rails version string could not be parsed.
    #[error("invalid rails version `{input}`: {message}")]
    InvalidVersion {
        /// The text that failed to parse.
        input: String,
        /// Description of the failure.
        message: String,
    },

    /// An edit could not be applied to the source.
    #[error("rewrite failed: {message}")]
    Rewrite {
        /// Description of the rewrite failure.
        message: String,
    },

    /// Autocorrection kept producing changes.
    #[error("autocorrect did not settle after {passes} passes")]
    CorrectionLoop {
        /// Number of passes attempted.
        passes: usize,
    },
}

impl CopError {
    /// Creates a cop setup error.
    #[must_use]
    pub const fn setup(cop: &'static str, source: SyntaxError) -> Self {
        Self::Setup { cop, source }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid version error.
    #[must_use]
    pub fn invalid_version(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidVersion {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a rewrite error.
    #[must_use]
    pub fn rewrite(message: impl Into<String>) -> Self {
        Self::Rewrite {
            message: message.into(),
        }
    }
}
