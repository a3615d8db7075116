//! The closed set of node kinds understood by patterns and cops.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Kind tag of a [`Node`](super::NodeRef).
///
/// The `snake_case` name of each variant is the spelling used by the pattern
/// language, so `(pair $_ hash)` refers to [`NodeKind::Pair`] and
/// [`NodeKind::Hash`].
///
/// # Example
///
/// ```
/// use std::str::FromStr;
/// use lintel_syntax::NodeKind;
///
/// assert_eq!(NodeKind::from_str("kwsplat"), Ok(NodeKind::KwSplat));
/// assert_eq!(NodeKind::Def.to_string(), "def");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// Root of a parsed file.
    Program,
    /// A sequence of statements (method, class, or block body).
    Begin,
    /// `class Name < Superclass ... end`; slots `[name, superclass?, body?]`.
    Class,
    /// `module Name ... end`; slots `[name, body?]`.
    Module,
    /// `def name(params) ... end`; slots `[name, params?, body?]`.
    Def,
    /// `def receiver.name(params) ... end`; slots `[receiver, name, params?, body?]`.
    Defs,
    /// Method call; slots `[receiver?, method, args...]`.
    Call,
    /// Block attached to a call; slots `[params?, body?]`.
    Block,
    /// Parameter list of a method or block.
    Params,
    /// `key => value` or `key: value`; slots `[key, value?]`.
    Pair,
    /// Hash literal, braced or an implicit trailing keyword-argument hash.
    Hash,
    /// Array literal.
    Array,
    /// Symbol literal; value is the name without the leading colon.
    Sym,
    /// String literal; value is the content when free of interpolation.
    Str,
    /// Integer literal.
    Int,
    /// Float literal.
    Float,
    /// Local identifier or method name.
    Ident,
    /// Constant reference; value is the full name including any `::` scope.
    Const,
    /// Instance variable.
    Ivar,
    /// `true`.
    True,
    /// `false`.
    False,
    /// `nil`.
    Nil,
    /// `self`.
    #[strum(serialize = "self")]
    #[serde(rename = "self")]
    SelfRef,
    /// `**expr` inside a hash or argument list.
    #[strum(serialize = "kwsplat")]
    #[serde(rename = "kwsplat")]
    KwSplat,
    /// `*expr`.
    Splat,
    /// `&block` argument.
    BlockPass,
    /// Any construct without a dedicated kind.
    Other,
}

impl NodeKind {
    /// Returns the pattern-language spelling of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
