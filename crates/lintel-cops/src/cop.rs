//! The contract every cop implements.

use std::fmt;

use lintel_syntax::{NodeKind, NodeRef};

use crate::config::RailsVersion;
use crate::offense::Severity;
use crate::reporter::Reporter;

/// A style rule evaluated against individual syntax nodes.
///
/// The [`Commissioner`](crate::Commissioner) calls [`on_node`](Self::on_node)
/// once for every node whose kind is listed in [`triggers`](Self::triggers),
/// in document order. Cops are immutable after construction: any patterns
/// they need are compiled in their constructor and the result of inspecting
/// a node depends only on that node and its ancestors.
pub trait Cop: fmt::Debug + Send + Sync {
    /// Returns the department-qualified name, e.g. `Rails/EnumSyntax`.
    fn name(&self) -> &'static str;

    /// Returns the node kinds this cop wants to see.
    fn triggers(&self) -> &'static [NodeKind];

    /// Restricts call-node dispatch to calls of these method names.
    fn restricted_methods(&self) -> Option<&'static [&'static str]> {
        None
    }

    /// Returns the lowest Rails version the cop applies to.
    fn minimum_target_rails_version(&self) -> Option<RailsVersion> {
        None
    }

    /// Returns the severity of the offenses this cop reports.
    fn severity(&self) -> Severity {
        Severity::Convention
    }

    /// Inspects one node, reporting any offenses through `reporter`.
    fn on_node(&self, node: NodeRef<'_>, reporter: &mut Reporter<'_>);
}
