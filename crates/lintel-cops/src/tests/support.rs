//! Shared helpers for cop unit tests.

use lintel_syntax::{Parser, Tree};

use crate::{Commissioner, Config, Cop, Offense};

pub(super) fn parse(source: &str) -> Tree {
    let mut parser = Parser::new().expect("parser");
    let parsed = parser.parse(source).expect("parse");
    assert!(!parsed.has_errors(), "fixture should parse: {source}");
    parsed.into_tree()
}

/// Builds a commissioner running only `cop`.
pub(super) fn enlist(cop: impl Cop + 'static, config: &Config) -> Commissioner {
    let boxed: Box<dyn Cop> = Box::new(cop);
    Commissioner::new(vec![boxed], config)
}

/// Runs a single cop with default settings.
pub(super) fn run(cop: impl Cop + 'static, source: &str) -> Vec<Offense> {
    enlist(cop, &Config::default()).investigate(&parse(source))
}

/// Returns the source text each offense is anchored at.
pub(super) fn anchors<'s>(source: &'s str, offenses: &[Offense]) -> Vec<&'s str> {
    offenses
        .iter()
        .map(|offense| {
            source
                .get(offense.span().byte_range())
                .expect("offense span inside source")
        })
        .collect()
}
