//! End-to-end tests for the Rails cops.
//!
//! Whole Ruby snippets are inspected and autocorrected through the public
//! [`Inspector`] API, with inline snapshots for rendered offenses and
//! corrected sources.

use insta::assert_snapshot;
use rstest::{fixture, rstest};

use lintel_cops::{Config, CopConfig, CopError, Inspector, RailsVersion, Report};

#[fixture]
fn inspector() -> Inspector {
    Inspector::new(&Config::default()).unwrap_or_else(|err| panic!("inspector: {err}"))
}

fn inspect(inspector: &mut Inspector, source: &str) -> Report {
    inspector
        .inspect(source)
        .unwrap_or_else(|err| panic!("inspect: {err}"))
}

/// Renders offenses the way a terminal formatter would.
fn render(report: &Report) -> String {
    report
        .offenses()
        .iter()
        .map(|offense| {
            let (line, column) = offense.span().start().one_based();
            let marker = if offense.is_correctable() { "[Correctable] " } else { "" };
            format!(
                "{line}:{column}: {}: {marker}{}: {}",
                offense.severity(),
                offense.cop_name(),
                offense.message()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const MODEL: &str = r"class Post < ApplicationRecord
  enum status: { draft: 0, published: 1 }, _prefix: true
  enum :visibility, [:public, :private], _scopes: false
  enum kind: [:article, :note], audience: [:all, :members]
end

class PublishJob < ApplicationJob
  def initialize(post)
    @post = post
  end

  def perform
  end
end
";

#[rstest]
fn reports_offenses_in_document_order(mut inspector: Inspector) {
    let report = inspect(&mut inspector, MODEL);
    assert_snapshot!(render(&report), @r"
    2:16: convention: [Correctable] Rails/EnumSyntax: Enum defined with keyword arguments in `status` enum declaration. Use positional arguments instead.
    3:42: convention: Rails/EnumSyntax: Enum defined with deprecated options in `visibility` enum declaration. Remove the `_` prefix.
    4:14: convention: Rails/EnumSyntax: Enum defined with keyword arguments in `kind` enum declaration. Use positional arguments instead.
    4:43: convention: Rails/EnumSyntax: Enum defined with keyword arguments in `audience` enum declaration. Use positional arguments instead.
    8:3: convention: Rails/ActiveJobInitialize: Avoid using `initialize` in ActiveJob. Move initialization logic to `before_perform` or `perform`.
    ");
}

#[rstest]
fn autocorrect_rewrites_only_safe_declarations(mut inspector: Inspector) {
    let outcome = inspector
        .autocorrect(MODEL)
        .unwrap_or_else(|err| panic!("autocorrect: {err}"));

    assert_eq!(outcome.corrections(), 1);
    assert_eq!(outcome.passes(), 2);
    assert_snapshot!(outcome.output(), @r"
    class Post < ApplicationRecord
      enum :status, { draft: 0, published: 1 }, prefix: true
      enum :visibility, [:public, :private], _scopes: false
      enum kind: [:article, :note], audience: [:all, :members]
    end

    class PublishJob < ApplicationJob
      def initialize(post)
        @post = post
      end

      def perform
      end
    end
    ");
    assert_eq!(outcome.remaining().offenses().len(), 4);
    assert!(
        outcome
            .remaining()
            .offenses()
            .iter()
            .all(|offense| !offense.is_correctable())
    );
}

#[rstest]
fn corrected_source_is_stable(mut inspector: Inspector) {
    let source = "enum status: {active: 0, archived: 1}, _prefix: true\n";
    let outcome = inspector
        .autocorrect(source)
        .unwrap_or_else(|err| panic!("autocorrect: {err}"));

    assert_eq!(
        outcome.output(),
        "enum :status, {active: 0, archived: 1}, prefix: true\n"
    );
    assert!(inspect(&mut inspector, outcome.output()).is_clean());

    let again = inspector
        .autocorrect(outcome.output())
        .unwrap_or_else(|err| panic!("autocorrect: {err}"));
    assert_eq!(again.output(), outcome.output());
    assert_eq!(again.corrections(), 0);
}

#[rstest]
fn corrects_every_declaration_in_one_pass(mut inspector: Inspector) {
    let source = "class A < ApplicationRecord\n  enum status: [:a, :b]\n  enum \"role\" => { admin: 0 }, _suffix: true\nend\n";
    let outcome = inspector
        .autocorrect(source)
        .unwrap_or_else(|err| panic!("autocorrect: {err}"));

    assert_eq!(outcome.corrections(), 2);
    assert_snapshot!(outcome.output(), @r#"
    class A < ApplicationRecord
      enum :status, [:a, :b]
      enum "role", { admin: 0 }, suffix: true
    end
    "#);
}

#[rstest]
#[case::default("enum default: [:a, :b]\n", "enum :default, [:a, :b]\n")]
#[case::prefix("enum prefix: { a: 0 }\n", "enum :prefix, { a: 0 }\n")]
fn enums_named_like_options_are_corrected(
    mut inspector: Inspector,
    #[case] source: &str,
    #[case] expected: &str,
) {
    let report = inspect(&mut inspector, source);
    assert_eq!(report.offenses_for("Rails/EnumSyntax").count(), 1);

    let outcome = inspector
        .autocorrect(source)
        .unwrap_or_else(|err| panic!("autocorrect: {err}"));
    assert_eq!(outcome.output(), expected);
}

#[rstest]
#[case::old_rails(Some(RailsVersion::new(6, 1)), 0)]
#[case::new_rails(Some(RailsVersion::new(7, 1)), 1)]
#[case::unset(None, 1)]
fn enum_syntax_is_gated_by_target_version(
    #[case] target: Option<RailsVersion>,
    #[case] expected: usize,
) {
    let config = match target {
        Some(version) => Config::default().with_target_rails_version(version),
        None => Config::default(),
    };
    let mut gated = Inspector::new(&config).unwrap_or_else(|err| panic!("inspector: {err}"));
    let report = inspect(&mut gated, "enum status: [:a]\n");
    assert_eq!(report.offenses_for("Rails/EnumSyntax").count(), expected);
}

#[test]
fn configuration_controls_cops() {
    let config = Config::from_json(
        r#"{
            "cops": {
                "Rails/EnumSyntax": { "autocorrect": false },
                "Rails/ActiveJobInitialize": { "base_class": "BaseJob" }
            }
        }"#,
    )
    .unwrap_or_else(|err| panic!("config: {err}"));
    let mut inspector = Inspector::new(&config).unwrap_or_else(|err| panic!("inspector: {err}"));

    let report = inspect(
        &mut inspector,
        "class A < BaseJob\n  def initialize; end\nend\nclass B < ApplicationJob\n  def initialize; end\nend\nenum status: [:a]\n",
    );
    assert_snapshot!(render(&report), @r"
    2:3: convention: Rails/ActiveJobInitialize: Avoid using `initialize` in ActiveJob. Move initialization logic to `before_perform` or `perform`.
    7:14: convention: Rails/EnumSyntax: Enum defined with keyword arguments in `status` enum declaration. Use positional arguments instead.
    ");

    let disabled = Config::default().with_cop(
        "Rails/ActiveJobInitialize",
        CopConfig::default().with_enabled(false),
    );
    let mut only_enums =
        Inspector::new(&disabled).unwrap_or_else(|err| panic!("inspector: {err}"));
    assert_eq!(
        only_enums.commissioner().cop_names().collect::<Vec<_>>(),
        vec!["Rails/EnumSyntax"]
    );
    let job = "class B < ApplicationJob\n  def initialize; end\nend\n";
    assert!(inspect(&mut only_enums, job).is_clean());
}

#[rstest]
fn sources_with_syntax_errors_are_not_inspected(mut inspector: Inspector) {
    let report = inspect(&mut inspector, "enum status: [:a\n");
    assert!(report.offenses().is_empty());
    assert!(!report.syntax_errors().is_empty());
}

#[rstest]
fn offenses_serialise_to_json(mut inspector: Inspector) {
    let report = inspect(&mut inspector, "enum status: [:a]");
    let json = serde_json::to_value(report.offenses())
        .unwrap_or_else(|err| panic!("serialise: {err}"));

    assert_snapshot!(json.to_string(), @r#"[{"cop_name":"Rails/EnumSyntax","correction":{"edits":[{"end":17,"replacement":"enum :status, [:a]","start":0}]},"message":"Enum defined with keyword arguments in `status` enum declaration. Use positional arguments instead.","severity":"convention","span":{"end":{"column":17,"line":0},"end_byte":17,"start":{"column":13,"line":0},"start_byte":13}}]"#);
}

#[test]
fn version_errors_surface_as_config_errors() {
    let result = Config::from_json(r#"{ "target_rails_version": "next" }"#);
    assert!(matches!(result, Err(CopError::Config { .. })));
}
