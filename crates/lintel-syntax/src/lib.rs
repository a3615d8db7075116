//! Syntax trees and node patterns for the Lintel cop engine.
//!
//! This crate provides the read-only structure that cops analyse:
//!
//! - **Node model** via [`Tree`], [`NodeRef`] and [`NodeKind`], an immutable
//!   arena with parent links for ancestor walks
//! - **Ruby parsing** via [`Parser`], which lowers the Tree-sitter Ruby
//!   grammar into the arena
//! - **Pattern matching** via [`NodePattern`], a compiled s-expression
//!   matcher with positional captures
//!
//! Hosts that bring their own parser can build trees directly with
//! [`TreeBuilder`].
//!
//! # Example
//!
//! ```
//! use lintel_syntax::{NodeKind, NodePattern, Parser};
//!
//! let parsed = Parser::new()?.parse("class MyJob < ApplicationJob\n  def initialize; end\nend\n")?;
//! let initializer = NodePattern::<0>::compile("(def :initialize ...)")?;
//!
//! let (def, []) = initializer.find_first(parsed.tree()).expect("initializer");
//! let class = def.find_ancestor(NodeKind::Class).expect("enclosing class");
//! assert_eq!(class.superclass().and_then(|s| s.const_name()), Some("ApplicationJob"));
//! # Ok::<(), lintel_syntax::SyntaxError>(())
//! ```

mod error;
mod parser;
mod pattern;
mod position;
mod span;
mod tree;

pub use error::SyntaxError;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use pattern::NodePattern;
pub use span::{LineCol, Span};
pub use tree::{Ancestors, NodeId, NodeKind, NodeRef, Preorder, Tree, TreeBuilder};

#[cfg(test)]
mod tests;
