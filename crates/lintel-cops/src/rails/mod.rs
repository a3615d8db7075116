//! Cops in the `Rails` department.

mod active_job_initialize;
mod enum_syntax;

pub use active_job_initialize::{ActiveJobInitialize, DEFAULT_BASE_CLASS};
pub use enum_syntax::EnumSyntax;

use crate::config::Config;
use crate::cop::Cop;
use crate::error::CopError;

/// Builds every cop in the department, configured from `config`.
///
/// Enablement and version gating are applied later by the
/// [`Commissioner`](crate::Commissioner).
///
/// # Errors
///
/// Returns [`CopError::Setup`] if a cop's patterns fail to compile.
pub fn builtin_cops(config: &Config) -> Result<Vec<Box<dyn Cop>>, CopError> {
    let job = config.cop(ActiveJobInitialize::NAME);
    let base_class = job.base_class().unwrap_or(DEFAULT_BASE_CLASS);
    let mut cops: Vec<Box<dyn Cop>> = Vec::with_capacity(2);
    cops.push(Box::new(ActiveJobInitialize::new(base_class)?));
    cops.push(Box::new(EnumSyntax::new()?));
    Ok(cops)
}
