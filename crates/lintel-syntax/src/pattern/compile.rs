//! Recursive-descent compiler from tokens to a pattern tree.

use std::str::FromStr;

use super::lexer::{Token, TokenKind};
use crate::error::SyntaxError;
use crate::tree::NodeKind;

/// A compiled pattern element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PatternNode {
    /// `_`: any present node.
    Any,
    /// `nil?`: an absent slot.
    Absent,
    /// Bare kind name.
    Kind(NodeKind),
    /// `:name`: a node whose literal value equals `name`.
    Value(String),
    /// `{a b ...}`.
    Either(Vec<PatternNode>),
    /// `(kind p1 p2 ...)`, optionally ending in `...`.
    Sequence {
        kind: NodeKind,
        slots: Vec<PatternNode>,
        rest: bool,
    },
    /// `$p`.
    Capture(Box<PatternNode>),
}

impl PatternNode {
    pub(super) fn capture_count(&self) -> usize {
        match self {
            Self::Any | Self::Absent | Self::Kind(_) | Self::Value(_) => 0,
            Self::Either(alternatives) => alternatives.iter().map(Self::capture_count).sum(),
            Self::Sequence { slots, .. } => slots.iter().map(Self::capture_count).sum(),
            Self::Capture(inner) => inner.capture_count().saturating_add(1),
        }
    }
}

pub(super) fn compile(tokens: &[Token], source_len: usize) -> Result<PatternNode, SyntaxError> {
    let mut compiler = Compiler {
        tokens,
        position: 0,
        source_len,
    };
    let root = compiler.pattern()?;
    if let Some(extra) = compiler.peek() {
        return Err(SyntaxError::pattern_compile(
            extra.offset,
            "unexpected token after the end of the pattern",
        ));
    }
    Ok(root)
}

struct Compiler<'t> {
    tokens: &'t [Token],
    position: usize,
    source_len: usize,
}

impl<'t> Compiler<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Result<&'t Token, SyntaxError> {
        let token = self.tokens.get(self.position).ok_or_else(|| {
            SyntaxError::pattern_compile(self.source_len, "unexpected end of pattern")
        })?;
        self.position = self.position.saturating_add(1);
        Ok(token)
    }

    fn pattern(&mut self) -> Result<PatternNode, SyntaxError> {
        let token = self.next()?;
        match &token.kind {
            TokenKind::Capture => {
                let inner = self.pattern()?;
                match inner {
                    PatternNode::Absent => Err(SyntaxError::pattern_compile(
                        token.offset,
                        "an absent slot cannot be captured",
                    )),
                    PatternNode::Capture(_) => Err(SyntaxError::pattern_compile(
                        token.offset,
                        "a capture cannot be captured again",
                    )),
                    other => Ok(PatternNode::Capture(Box::new(other))),
                }
            }
            TokenKind::OpenParen => self.sequence(token),
            TokenKind::OpenBrace => self.either(token),
            TokenKind::Word(word) => word_pattern(word, token.offset),
            TokenKind::Literal(name) => Ok(PatternNode::Value(name.clone())),
            TokenKind::Rest => Err(SyntaxError::pattern_compile(
                token.offset,
                "`...` may only end a child list",
            )),
            TokenKind::CloseParen | TokenKind::CloseBrace => Err(SyntaxError::pattern_compile(
                token.offset,
                "unbalanced closing delimiter",
            )),
        }
    }

    fn sequence(&mut self, open: &Token) -> Result<PatternNode, SyntaxError> {
        let head = self.next()?;
        let kind = match &head.kind {
            TokenKind::Word(word) => parse_kind(word, head.offset)?,
            _ => {
                return Err(SyntaxError::pattern_compile(
                    head.offset,
                    "a child list must start with a node kind",
                ));
            }
        };

        let mut slots = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                return Err(SyntaxError::pattern_compile(
                    open.offset,
                    "unclosed `(`",
                ));
            };
            match token.kind {
                TokenKind::CloseParen => {
                    self.position = self.position.saturating_add(1);
                    return Ok(PatternNode::Sequence {
                        kind,
                        slots,
                        rest: false,
                    });
                }
                TokenKind::Rest => {
                    self.position = self.position.saturating_add(1);
                    let close = self.next()?;
                    if close.kind != TokenKind::CloseParen {
                        return Err(SyntaxError::pattern_compile(
                            token.offset,
                            "`...` may only end a child list",
                        ));
                    }
                    return Ok(PatternNode::Sequence {
                        kind,
                        slots,
                        rest: true,
                    });
                }
                _ => slots.push(self.pattern()?),
            }
        }
    }

    fn either(&mut self, open: &Token) -> Result<PatternNode, SyntaxError> {
        let mut alternatives = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                return Err(SyntaxError::pattern_compile(
                    open.offset,
                    "unclosed `{`",
                ));
            };
            if token.kind == TokenKind::CloseBrace {
                self.position = self.position.saturating_add(1);
                break;
            }
            let alternative = self.pattern()?;
            if alternative.capture_count() > 0 {
                return Err(SyntaxError::pattern_compile(
                    token.offset,
                    "alternatives cannot contain captures; capture the whole `{...}` instead",
                ));
            }
            alternatives.push(alternative);
        }

        if alternatives.is_empty() {
            return Err(SyntaxError::pattern_compile(
                open.offset,
                "`{}` needs at least one alternative",
            ));
        }
        Ok(PatternNode::Either(alternatives))
    }
}

fn word_pattern(word: &str, offset: usize) -> Result<PatternNode, SyntaxError> {
    match word {
        "_" => Ok(PatternNode::Any),
        "nil?" => Ok(PatternNode::Absent),
        other => parse_kind(other, offset).map(PatternNode::Kind),
    }
}

fn parse_kind(word: &str, offset: usize) -> Result<NodeKind, SyntaxError> {
    NodeKind::from_str(word)
        .map_err(|_| SyntaxError::pattern_compile(offset, format!("unknown node kind `{word}`")))
}
