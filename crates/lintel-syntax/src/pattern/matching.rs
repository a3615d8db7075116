//! Structural matching of compiled patterns against tree nodes.
//!
//! Matching is local and deterministic: `...` only ends a child list and
//! alternatives hold no captures, so no backtracking is needed.

use super::compile::PatternNode;
use crate::tree::{NodeKind, NodeRef};

/// Matches `pattern` against a slot that may be absent, appending captures
/// in left-to-right, depth-first order.
pub(super) fn match_slot<'t>(
    pattern: &PatternNode,
    slot: Option<NodeRef<'t>>,
    captures: &mut Vec<NodeRef<'t>>,
) -> bool {
    match (pattern, slot) {
        (PatternNode::Absent, slot) => slot.is_none(),
        (_, None) => false,
        (PatternNode::Any, Some(_)) => true,
        (PatternNode::Kind(kind), Some(node)) => node.is(*kind),
        (PatternNode::Value(expected), Some(node)) => node.value() == Some(expected.as_str()),
        (PatternNode::Either(alternatives), Some(node)) => alternatives
            .iter()
            .any(|alternative| match_slot(alternative, Some(node), captures)),
        (PatternNode::Capture(inner), Some(node)) => {
            let mark = captures.len();
            captures.push(node);
            let matched = match_slot(inner, Some(node), captures);
            if !matched {
                captures.truncate(mark);
            }
            matched
        }
        (PatternNode::Sequence { kind, slots, rest }, Some(node)) => {
            match_sequence(node, *kind, slots, *rest, captures)
        }
    }
}

fn match_sequence<'t>(
    node: NodeRef<'t>,
    kind: NodeKind,
    slots: &[PatternNode],
    rest: bool,
    captures: &mut Vec<NodeRef<'t>>,
) -> bool {
    if !node.is(kind) {
        return false;
    }

    let count = node.slot_count();
    let arity_ok = if rest {
        count >= slots.len()
    } else {
        count == slots.len()
    };
    if !arity_ok {
        return false;
    }

    let mark = captures.len();
    let matched = slots
        .iter()
        .zip(node.slots())
        .all(|(pattern, slot)| match_slot(pattern, slot, captures));
    if !matched {
        captures.truncate(mark);
    }
    matched
}
