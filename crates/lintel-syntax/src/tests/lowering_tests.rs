//! Tests for lowering Tree-sitter Ruby trees into the arena.

use rstest::rstest;

use crate::{NodeKind, NodeRef, Parser, Tree};

fn tree(source: &str) -> Tree {
    let mut parser = Parser::new().expect("parser");
    let parsed = parser.parse(source).expect("parse");
    assert!(!parsed.has_errors(), "fixture should parse: {source}");
    parsed.into_tree()
}

fn first(tree: &Tree, kind: NodeKind) -> NodeRef<'_> {
    tree.preorder()
        .find(|node| node.is(kind))
        .unwrap_or_else(|| panic!("no {kind} node"))
}

#[test]
fn bare_keyword_arguments_become_one_hash() {
    let tree = tree("enum status: { active: 0 }, _prefix: true");
    let call = first(&tree, NodeKind::Call);

    assert!(call.receiver().is_none());
    assert_eq!(call.method_name(), Some("enum"));
    let args: Vec<_> = call.arguments().collect();
    assert_eq!(args.len(), 1);

    let hash = args.first().copied().expect("hash");
    assert!(hash.is(NodeKind::Hash));
    assert_eq!(hash.source(), "status: { active: 0 }, _prefix: true");
    let keys: Vec<_> = hash
        .pairs()
        .filter_map(|pair| pair.pair_key())
        .map(|key| (key.kind(), key.source(), key.value()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (NodeKind::Sym, "status", Some("status")),
            (NodeKind::Sym, "_prefix", Some("_prefix")),
        ]
    );
}

#[test]
fn positional_arguments_keep_their_order() {
    let tree = tree("enum :status, [:active], suffix: true");
    let call = first(&tree, NodeKind::Call);

    let kinds: Vec<_> = call.arguments().map(|arg| arg.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::Sym, NodeKind::Array, NodeKind::Hash]);
}

#[test]
fn parenthesised_calls_match_bare_calls() {
    let bare = tree("enum status: [:a]");
    let parens = tree("enum(status: [:a])");

    let shape = |tree: &Tree| -> Vec<NodeKind> {
        first(tree, NodeKind::Call)
            .arguments()
            .map(|arg| arg.kind())
            .collect()
    };
    assert_eq!(shape(&bare), shape(&parens));
}

#[test]
fn keyword_splats_join_the_implicit_hash() {
    let tree = tree("enum status: [:a], **options");
    let call = first(&tree, NodeKind::Call);
    let hash = call.arguments().next().expect("hash");

    let kinds: Vec<_> = hash.children().map(|child| child.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::Pair, NodeKind::KwSplat]);
}

#[rstest]
#[case(":status", NodeKind::Sym, Some("status"))]
#[case("\"status\"", NodeKind::Str, Some("status"))]
#[case("'status'", NodeKind::Str, Some("status"))]
#[case("\"st#{x}\"", NodeKind::Str, None)]
#[case("42", NodeKind::Int, Some("42"))]
#[case("Foo::Bar", NodeKind::Const, Some("Foo::Bar"))]
#[case("::Foo::Bar", NodeKind::Const, Some("Foo::Bar"))]
fn literals_carry_values(
    #[case] literal: &str,
    #[case] kind: NodeKind,
    #[case] value: Option<&str>,
) {
    let source = format!("x = {literal}");
    let tree = tree(&source);
    let node = first(&tree, kind);

    assert_eq!(node.source(), literal);
    assert_eq!(node.value(), value);
}

#[test]
fn class_records_superclass() {
    let tree = tree("class MyJob < ApplicationJob\n  def perform; end\nend\n");
    let class = first(&tree, NodeKind::Class);

    assert_eq!(
        class.superclass().and_then(|sc| sc.const_name()),
        Some("ApplicationJob")
    );
    let def = first(&tree, NodeKind::Def);
    assert_eq!(def.find_ancestor(NodeKind::Class), Some(class));
}

#[test]
fn top_level_superclass_drops_leading_scope() {
    let tree = tree("class MyJob < ::ApplicationJob\nend\n");
    let class = first(&tree, NodeKind::Class);

    assert_eq!(
        class.superclass().and_then(|sc| sc.const_name()),
        Some("ApplicationJob")
    );
}

#[rstest]
#[case::label("{ \"order status\": 1 }", NodeKind::Sym, "\"order status\"")]
#[case::rocket("{ \"order status\" => 1 }", NodeKind::Str, "\"order status\"")]
fn quoted_pair_keys_follow_their_syntax(
    #[case] literal: &str,
    #[case] kind: NodeKind,
    #[case] source: &str,
) {
    let tree = tree(&format!("x = {literal}"));
    let pair = first(&tree, NodeKind::Pair);
    let key = pair.pair_key().expect("key");

    assert_eq!(key.kind(), kind);
    assert_eq!(key.source(), source);
    assert_eq!(key.value(), Some("order status"));
}

#[test]
fn class_without_superclass_has_absent_slot() {
    let tree = tree("class MyService\n  def initialize; end\nend\n");
    let class = first(&tree, NodeKind::Class);

    assert!(class.superclass().is_none());
    assert_eq!(class.slot_count(), 3);
}

#[test]
fn comments_are_dropped() {
    let tree = tree("# leading\nfoo(1) # trailing\n");
    assert_eq!(tree.root().children().count(), 1);
    assert!(
        tree.preorder()
            .all(|node| !matches!(node.source(), "# leading" | "# trailing"))
    );
}

#[test]
fn singleton_methods_are_distinct_from_instance_methods() {
    let tree = tree("def self.initialize; end");
    let defs = first(&tree, NodeKind::Defs);

    assert_eq!(defs.method_name(), Some("initialize"));
    assert!(tree.preorder().all(|node| !node.is(NodeKind::Def)));
}
