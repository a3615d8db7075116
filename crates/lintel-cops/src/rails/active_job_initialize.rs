//! `Rails/ActiveJobInitialize`: flags constructors in job classes.
//!
//! ```ruby
//! # bad
//! class MyJob < ApplicationJob
//!   def initialize
//!     JobLogger.info('Job started')
//!     super
//!   end
//! end
//!
//! # good
//! class MyJob < ApplicationJob
//!   before_perform -> { JobLogger.info('Job started') }
//! end
//! ```
//!
//! Only the nearest enclosing class is examined, and its superclass must be
//! written as the base class name itself. Jobs inheriting indirectly are not
//! detected.

use lintel_syntax::{NodeKind, NodePattern, NodeRef};

use crate::cop::Cop;
use crate::error::CopError;
use crate::reporter::Reporter;

/// Default name of the job base class.
pub const DEFAULT_BASE_CLASS: &str = "ApplicationJob";

const MSG: &str = "Avoid using `initialize` in ActiveJob. Move initialization logic to `before_perform` or `perform`.";

/// Reports `def initialize` inside direct subclasses of the job base class.
#[derive(Debug)]
pub struct ActiveJobInitialize {
    initializer: NodePattern<0>,
    base_class: String,
}

impl ActiveJobInitialize {
    /// Cop name used in configuration and offenses.
    pub const NAME: &'static str = "Rails/ActiveJobInitialize";

    /// Creates the cop for jobs subclassing `base_class`.
    ///
    /// # Errors
    ///
    /// Returns [`CopError::Setup`] if the cop's pattern fails to compile.
    pub fn new(base_class: impl Into<String>) -> Result<Self, CopError> {
        let initializer = NodePattern::compile("(def :initialize ...)")
            .map_err(|err| CopError::setup(Self::NAME, err))?;
        Ok(Self {
            initializer,
            base_class: base_class.into(),
        })
    }

    /// Returns the base class name jobs are matched against.
    #[must_use]
    pub fn base_class(&self) -> &str {
        &self.base_class
    }

    fn in_job_class(&self, node: NodeRef<'_>) -> bool {
        node.find_ancestor(NodeKind::Class)
            .and_then(NodeRef::superclass)
            .and_then(NodeRef::const_name)
            .is_some_and(|name| name == self.base_class)
    }
}

impl Cop for ActiveJobInitialize {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn triggers(&self) -> &'static [NodeKind] {
        &[NodeKind::Def]
    }

    fn on_node(&self, node: NodeRef<'_>, reporter: &mut Reporter<'_>) {
        if self.initializer.is_match(node) && self.in_job_class(node) {
            reporter.report(node, MSG, None);
        }
    }
}
