//! Dispatches syntax nodes to the cops interested in them.

use lintel_syntax::{NodeKind, NodeRef, Tree};
use tracing::debug;

use crate::config::Config;
use crate::cop::Cop;
use crate::offense::Offense;
use crate::reporter::Reporter;

const COMMISSIONER_TARGET: &str = "lintel_cops::commissioner";

#[derive(Debug)]
struct Enlisted {
    cop: Box<dyn Cop>,
    autocorrect: bool,
}

/// Walks a tree once and runs every enlisted cop on the nodes it triggers on.
#[derive(Debug, Default)]
pub struct Commissioner {
    cops: Vec<Enlisted>,
}

impl Commissioner {
    /// Enlists the cops that `config` enables and whose minimum Rails version
    /// the configured target satisfies.
    #[must_use]
    pub fn new(cops: Vec<Box<dyn Cop>>, config: &Config) -> Self {
        let enlisted = cops
            .into_iter()
            .filter_map(|cop| {
                let settings = config.cop(cop.name());
                if !settings.enabled() {
                    debug!(target: COMMISSIONER_TARGET, cop = cop.name(), "cop disabled");
                    return None;
                }
                if !config.admits(cop.minimum_target_rails_version()) {
                    debug!(
                        target: COMMISSIONER_TARGET,
                        cop = cop.name(),
                        minimum = ?cop.minimum_target_rails_version(),
                        target = ?config.target_rails_version(),
                        "cop gated by target rails version"
                    );
                    return None;
                }
                Some(Enlisted {
                    autocorrect: settings.autocorrect(),
                    cop,
                })
            })
            .collect();
        Self { cops: enlisted }
    }

    /// Returns the names of the enlisted cops.
    pub fn cop_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cops.iter().map(|enlisted| enlisted.cop.name())
    }

    /// Returns the number of enlisted cops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cops.len()
    }

    /// Returns `true` if no cop is enlisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cops.is_empty()
    }

    /// Runs every enlisted cop over `tree`, returning offenses in document
    /// order.
    #[must_use]
    pub fn investigate(&self, tree: &Tree) -> Vec<Offense> {
        let mut offenses = Vec::new();
        for node in tree.preorder() {
            for enlisted in &self.cops {
                if !triggers_on(enlisted.cop.as_ref(), node) {
                    continue;
                }
                let mut reporter = Reporter::new(
                    enlisted.cop.name(),
                    enlisted.cop.severity(),
                    enlisted.autocorrect,
                    &mut offenses,
                );
                enlisted.cop.on_node(node, &mut reporter);
            }
        }
        offenses
    }
}

fn triggers_on(cop: &dyn Cop, node: NodeRef<'_>) -> bool {
    if !cop.triggers().contains(&node.kind()) {
        return false;
    }
    match cop.restricted_methods() {
        Some(allowed) if node.is(NodeKind::Call) => node
            .method_name()
            .is_some_and(|name| allowed.contains(&name)),
        _ => true,
    }
}
