//! `Rails/EnumSyntax`: keyword-argument enum declarations.
//!
//! Rails 7.0 introduced positional `enum` arguments and deprecated both the
//! keyword form and the underscore-prefixed option names.
//!
//! ```ruby
//! # bad
//! enum status: { active: 0, archived: 1 }, _prefix: true
//!
//! # good
//! enum :status, { active: 0, archived: 1 }, prefix: true
//! ```

use lintel_syntax::{NodeKind, NodePattern, NodeRef};

use crate::config::RailsVersion;
use crate::cop::Cop;
use crate::corrector::Corrector;
use crate::error::CopError;
use crate::reporter::Reporter;

const OPTION_NAMES: [&str; 4] = ["prefix", "suffix", "scopes", "default"];

fn keyword_message(enum_name: &str) -> String {
    format!(
        "Enum defined with keyword arguments in `{enum_name}` enum declaration. Use positional arguments instead."
    )
}

fn options_message(enum_name: &str) -> String {
    format!(
        "Enum defined with deprecated options in `{enum_name}` enum declaration. Remove the `_` prefix."
    )
}

/// Reports keyword-style `enum` calls and deprecated `_`-prefixed options.
#[derive(Debug)]
pub struct EnumSyntax {
    keyword_style: NodePattern<1>,
    positional_style: NodePattern<3>,
    value_list: NodePattern<2>,
    option_key: NodePattern<1>,
}

impl EnumSyntax {
    /// Cop name used in configuration and offenses.
    pub const NAME: &'static str = "Rails/EnumSyntax";

    /// Creates the cop.
    ///
    /// # Errors
    ///
    /// Returns [`CopError::Setup`] if one of the cop's patterns fails to
    /// compile.
    pub fn new() -> Result<Self, CopError> {
        let setup = |err| CopError::setup(Self::NAME, err);
        Ok(Self {
            keyword_style: NodePattern::compile("(call nil? :enum $hash)").map_err(setup)?,
            positional_style: NodePattern::compile("(call nil? :enum $_ ${array hash} $hash)")
                .map_err(setup)?,
            value_list: NodePattern::compile("(pair $_ ${array hash})").map_err(setup)?,
            option_key: NodePattern::compile("(pair $_ ...)").map_err(setup)?,
        })
    }

    fn check_keyword_arguments(&self, node: NodeRef<'_>, reporter: &mut Reporter<'_>) {
        let Some([hash]) = self.keyword_style.matches(node) else {
            return;
        };
        let ambiguous = defines_multiple_enums(hash);

        for pair in hash.pairs() {
            let Some([key, values]) = self.value_list.matches(pair) else {
                continue;
            };

            let correction = if reporter.wants_corrections() {
                let mut corrector = Corrector::new();
                if ambiguous {
                    corrector.withhold("call defines more than one enum");
                } else if node.is_multiline() {
                    corrector.withhold("multi-line enum declaration");
                } else if let Some(options) = render_options(hash, pair) {
                    corrector.replace(
                        node.span().byte_range(),
                        format!(
                            "{} {}, {}{options}",
                            node.method_name().unwrap_or("enum"),
                            enum_name_literal(key),
                            values.source()
                        ),
                    );
                } else {
                    corrector.withhold("options cannot be rewritten");
                }
                corrector.build()
            } else {
                None
            };

            reporter.report(values, keyword_message(&enum_name_value(key)), correction);
        }
    }

    fn check_enum_options(&self, node: NodeRef<'_>, reporter: &mut Reporter<'_>) {
        let Some([key, _values, options]) = self.positional_style.matches(node) else {
            return;
        };
        let enum_name = enum_name_value(key);

        for pair in options.pairs() {
            let Some([name]) = self.option_key.matches(pair) else {
                continue;
            };
            if name.source().starts_with('_') {
                reporter.report(name, options_message(&enum_name), None);
            }
        }
    }
}

impl Cop for EnumSyntax {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn triggers(&self) -> &'static [NodeKind] {
        &[NodeKind::Call]
    }

    fn restricted_methods(&self) -> Option<&'static [&'static str]> {
        Some(&["enum"])
    }

    fn minimum_target_rails_version(&self) -> Option<RailsVersion> {
        Some(RailsVersion::new(7, 0))
    }

    fn on_node(&self, node: NodeRef<'_>, reporter: &mut Reporter<'_>) {
        self.check_keyword_arguments(node, reporter);
        self.check_enum_options(node, reporter);
    }
}

/// Name used in messages: the literal value of a symbol or string key,
/// otherwise its source.
fn enum_name_value(key: NodeRef<'_>) -> String {
    match (key.kind(), key.value()) {
        (NodeKind::Sym | NodeKind::Str, Some(value)) => value.to_owned(),
        _ => key.source().to_owned(),
    }
}

/// Name used in the rewritten call: a literal that evaluates to the key.
fn enum_name_literal(key: NodeRef<'_>) -> String {
    match (key.kind(), key.value()) {
        (NodeKind::Str, Some(value)) => dump_string(value),
        (NodeKind::Sym, Some(value)) => inspect_symbol(value),
        _ => key.source().to_owned(),
    }
}

/// Key name with any leading underscore removed, for option comparisons.
fn key_name(key: NodeRef<'_>) -> String {
    let mut name = enum_name_value(key);
    if name.starts_with('_') {
        name.remove(0);
    }
    name
}

fn is_option_name(name: &str) -> bool {
    OPTION_NAMES.contains(&name)
}

/// Two or more non-option keys mean the call declares several enums at once.
fn defines_multiple_enums(hash: NodeRef<'_>) -> bool {
    hash.pairs()
        .filter_map(NodeRef::pair_key)
        .filter(|key| !is_option_name(&key_name(*key)))
        .count()
        >= 2
}

/// Renders the pairs other than `skip` as `, name: value, ...`.
///
/// Returns `None` when the hash holds something that cannot be carried over
/// as a keyword option, such as a `**splat` or a value-less pair.
fn render_options(hash: NodeRef<'_>, skip: NodeRef<'_>) -> Option<String> {
    let mut rendered = String::new();
    for child in hash.children() {
        if child == skip {
            continue;
        }
        if !child.is(NodeKind::Pair) {
            return None;
        }
        let key = child.pair_key()?;
        let value = child.pair_value()?;
        rendered.push_str(", ");
        rendered.push_str(&key_name(key));
        rendered.push_str(": ");
        rendered.push_str(value.source());
    }
    Some(rendered)
}

/// Renders a symbol the way Ruby's `Symbol#inspect` does.
fn inspect_symbol(name: &str) -> String {
    if is_plain_symbol(name) {
        format!(":{name}")
    } else {
        format!(":{}", dump_string(name))
    }
}

fn is_plain_symbol(name: &str) -> bool {
    let body = name.strip_suffix(['?', '!', '=']).unwrap_or(name);
    let mut chars = body.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_ascii_alphabetic())
        && chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

/// Renders a string the way Ruby's `String#dump` does.
fn dump_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            '\u{08}' => out.push_str("\\b"),
            '\u{07}' => out.push_str("\\a"),
            '\u{1b}' => out.push_str("\\e"),
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => out.push_str("\\#"),
            ch if ch.is_ascii_graphic() || ch == ' ' => out.push(ch),
            ch if ch.is_ascii() => out.push_str(&format!("\\x{:02X}", u32::from(ch))),
            ch if u32::from(ch) <= 0xFFFF => out.push_str(&format!("\\u{:04X}", u32::from(ch))),
            ch => out.push_str(&format!("\\u{{{:X}}}", u32::from(ch))),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{dump_string, inspect_symbol};

    #[rstest]
    #[case::plain("status", "\"status\"")]
    #[case::quote("say \"hi\"", "\"say \\\"hi\\\"\"")]
    #[case::newline("a\nb", "\"a\\nb\"")]
    #[case::interpolation_marker("#{x}", "\"\\#{x}\"")]
    #[case::unicode("café", "\"caf\\u00E9\"")]
    #[case::astral("🎉", "\"\\u{1F389}\"")]
    fn dumps_like_ruby(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(dump_string(value), expected);
    }

    #[rstest]
    #[case::identifier("status", ":status")]
    #[case::predicate("active?", ":active?")]
    #[case::spaced("order status", ":\"order status\"")]
    #[case::leading_digit("1st", ":\"1st\"")]
    fn inspects_like_ruby(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(inspect_symbol(name), expected);
    }
}
