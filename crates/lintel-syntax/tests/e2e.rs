//! End-to-end tests for lintel-syntax using insta for snapshot testing.
//!
//! These tests drive the public API from Ruby source text through parsing
//! and pattern matching, with inline snapshots for structured outputs.

use insta::assert_snapshot;
use rstest::{fixture, rstest};

use lintel_syntax::{NodeKind, NodePattern, Parser, SyntaxError, Tree};

/// Fixture providing a Ruby parser.
#[fixture]
fn parser() -> Parser {
    Parser::new().unwrap_or_else(|err| panic!("parser: {err}"))
}

fn parse(parser: &mut Parser, source: &str) -> Tree {
    let result = parser
        .parse(source)
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert!(!result.has_errors(), "fixture should parse: {source}");
    result.into_tree()
}

/// Renders the kinds and sources of a node's subtree, one per line.
fn outline(tree: &Tree) -> String {
    tree.preorder()
        .map(|node| {
            let depth = node.ancestors().count();
            format!("{}{} {:?}", "  ".repeat(depth), node.kind(), node.source())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Happy Path: Parsing
// =============================================================================

#[rstest]
#[case("enum status: { active: 0, archived: 1 }, _prefix: true")]
#[case("class MyJob < ApplicationJob\n  def initialize(...)\n    super\n  end\nend\n")]
#[case("module Jobs\n  def self.call(x) = x\nend\n")]
fn parse_valid_source_succeeds(mut parser: Parser, #[case] source: &str) {
    let tree = parse(&mut parser, source);
    assert_eq!(tree.source(), source);
    assert!(tree.root().is(NodeKind::Program));
}

#[rstest]
fn snapshot_keyword_enum_outline(mut parser: Parser) {
    let tree = parse(&mut parser, "enum status: [:a], _prefix: true");
    assert_snapshot!(outline(&tree), @r#"
    program "enum status: [:a], _prefix: true"
      call "enum status: [:a], _prefix: true"
        ident "enum"
        hash "status: [:a], _prefix: true"
          pair "status: [:a]"
            sym "status"
            array "[:a]"
              sym ":a"
          pair "_prefix: true"
            sym "_prefix"
            true "true"
    "#);
}

// =============================================================================
// Happy Path: Pattern Matching
// =============================================================================

#[rstest]
fn pattern_captures_every_enum_value_list(mut parser: Parser) {
    let tree = parse(
        &mut parser,
        "enum status: [:a], kind: { x: 1 }, _suffix: true\nenum :role, [:admin]\n",
    );
    let pattern = NodePattern::<2>::compile("(pair $_ ${array hash})")
        .unwrap_or_else(|err| panic!("pattern: {err}"));

    let found: Vec<_> = pattern
        .find_all(&tree)
        .into_iter()
        .map(|(_, [key, values])| format!("{} => {}", key.source(), values.source()))
        .collect();
    assert_snapshot!(found.join("\n"), @r"
    status => [:a]
    kind => { x: 1 }
    ");
}

#[rstest]
fn pattern_distinguishes_positional_from_keyword_calls(mut parser: Parser) {
    let tree = parse(
        &mut parser,
        "enum status: [:a]\nenum :status, [:a], prefix: true\nenum :status, [:a]\n",
    );
    let keyword = NodePattern::<1>::compile("(call nil? :enum $hash)")
        .unwrap_or_else(|err| panic!("pattern: {err}"));
    let positional = NodePattern::<3>::compile("(call nil? :enum $_ ${array hash} $hash)")
        .unwrap_or_else(|err| panic!("pattern: {err}"));

    let keyword_lines: Vec<_> = keyword
        .find_all(&tree)
        .iter()
        .map(|(node, _)| node.span().start().line())
        .collect();
    let positional_lines: Vec<_> = positional
        .find_all(&tree)
        .iter()
        .map(|(node, _)| node.span().start().line())
        .collect();
    assert_eq!(keyword_lines, vec![0]);
    assert_eq!(positional_lines, vec![1]);
}

// =============================================================================
// Unhappy Paths
// =============================================================================

#[rstest]
fn parse_errors_are_reported_not_raised(mut parser: Parser) {
    let result = parser
        .parse("class Broken <\n  def initialize(\nend\n")
        .unwrap_or_else(|err| panic!("parse: {err}"));

    assert!(result.has_errors());
    assert!(result.errors().iter().all(|error| error.line >= 1));
}

#[rstest]
#[case::unclosed("(call nil? :enum", "unclosed `(`")]
#[case::stray_close("(pair _ _))", "unexpected token after the end")]
#[case::unknown_kind("(send nil? :enum)", "unknown node kind")]
#[case::capture_in_alternation("{$array hash}", "alternatives cannot contain captures")]
fn malformed_patterns_fail_at_compile_time(#[case] source: &str, #[case] fragment: &str) {
    let err = NodePattern::<0>::compile(source)
        .err()
        .unwrap_or_else(|| panic!("pattern should not compile: {source}"));
    assert!(matches!(err, SyntaxError::PatternCompileError { .. }));
    assert!(
        err.to_string().contains(fragment),
        "{err} should mention {fragment}"
    );
}

#[test]
fn capture_count_is_checked() {
    let result = NodePattern::<1>::compile("(pair $_ $_)");
    assert!(matches!(
        result,
        Err(SyntaxError::CaptureCountMismatch {
            expected: 1,
            found: 2,
            ..
        })
    ));
}
