//! Rails style cops built on `lintel-syntax` node patterns.
//!
//! Each cop implements [`Cop`] and reports [`Offense`]s through a
//! [`Reporter`] while a [`Commissioner`] walks the syntax tree. Offenses may
//! carry a [`Correction`], built with a [`Corrector`] and withheld whenever
//! a mechanical rewrite would not be safe.
//!
//! # Cops
//!
//! - [`rails::ActiveJobInitialize`] flags `initialize` in job classes
//! - [`rails::EnumSyntax`] flags keyword-style `enum` declarations and
//!   deprecated `_`-prefixed enum options
//!
//! # Example
//!
//! ```
//! use lintel_cops::{Config, Inspector};
//!
//! let mut inspector = Inspector::new(&Config::default())?;
//! let report = inspector.inspect("enum status: { active: 0 }, _prefix: true\n")?;
//!
//! let [offense] = report.offenses() else { panic!("one offense") };
//! assert_eq!(offense.cop_name(), "Rails/EnumSyntax");
//! assert!(offense.is_correctable());
//! # Ok::<(), lintel_cops::CopError>(())
//! ```

mod commissioner;
mod config;
mod cop;
mod corrector;
mod error;
mod inspector;
mod offense;
pub mod rails;
mod reporter;

pub use commissioner::Commissioner;
pub use config::{Config, CopConfig, RailsVersion};
pub use cop::Cop;
pub use corrector::{Correction, CorrectionOutcome, Corrector, Edit, apply_corrections};
pub use error::CopError;
pub use inspector::{AutocorrectOutcome, Inspector, MAX_CORRECTION_PASSES};
pub use offense::{Offense, Report, Severity};
pub use reporter::Reporter;

#[cfg(test)]
mod tests;
