//! Tests for tree navigation.

use rstest::rstest;

use crate::{NodeKind, Parser, Tree};

fn tree(source: &str) -> Tree {
    let mut parser = Parser::new().expect("parser");
    let parsed = parser.parse(source).expect("parse");
    assert!(!parsed.has_errors(), "fixture should parse: {source}");
    parsed.into_tree()
}

const JOB: &str =
    "module Jobs\n  class MyJob < ApplicationJob\n    def initialize\n      super\n    end\n  end\nend\n";

#[test]
fn preorder_visits_in_document_order() {
    let tree = tree(JOB);
    let kinds: Vec<_> = tree
        .preorder()
        .map(|node| node.kind())
        .filter(|kind| matches!(kind, NodeKind::Module | NodeKind::Class | NodeKind::Def))
        .collect();
    assert_eq!(kinds, vec![NodeKind::Module, NodeKind::Class, NodeKind::Def]);
}

#[test]
fn ancestors_walk_to_the_root() {
    let tree = tree(JOB);
    let def = tree
        .preorder()
        .find(|node| node.is(NodeKind::Def))
        .expect("def");

    let class = def.find_ancestor(NodeKind::Class).expect("class");
    assert_eq!(class.child(0).and_then(|name| name.const_name()), Some("MyJob"));
    assert!(def.find_ancestor(NodeKind::Module).is_some());
    assert_eq!(
        def.ancestors().last().map(|node| node.kind()),
        Some(NodeKind::Program)
    );
}

#[test]
fn find_ancestor_returns_none_at_top_level() {
    let tree = tree("def initialize; end");
    let def = tree
        .preorder()
        .find(|node| node.is(NodeKind::Def))
        .expect("def");
    assert!(def.find_ancestor(NodeKind::Class).is_none());
}

#[test]
fn descendants_exclude_self() {
    let tree = tree("[1, [2]]");
    let outer = tree
        .preorder()
        .find(|node| node.is(NodeKind::Array))
        .expect("array");
    let sources: Vec<_> = outer.descendants().map(|node| node.source()).collect();
    assert_eq!(sources, vec!["1", "[2]", "2"]);
}

#[rstest]
#[case("enum status: [:a]", false)]
#[case("enum status: [\n  :a\n]", true)]
fn multiline_reflects_span(#[case] source: &str, #[case] multiline: bool) {
    let tree = tree(source);
    let call = tree
        .preorder()
        .find(|node| node.is(NodeKind::Call))
        .expect("call");
    assert_eq!(call.is_multiline(), multiline);
}

#[test]
fn node_lookup_rejects_foreign_ids() {
    let small = tree("1");
    let large = tree("[1, 2, 3, 4, 5]");
    let last = large.preorder().last().expect("node");
    assert!(small.node(last.id()).is_none());
    assert!(large.node(last.id()).is_some());
}
