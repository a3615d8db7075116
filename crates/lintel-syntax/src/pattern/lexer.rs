//! Tokeniser for the node pattern language.

use crate::error::SyntaxError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TokenKind {
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Capture,
    Rest,
    /// A bare word: a kind name, `_`, or `nil?`.
    Word(String),
    /// `:name`, a literal value.
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) offset: usize,
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '?' | '!' | '=')
}

pub(super) fn tokenise(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let kind = match ch {
            c if c.is_whitespace() => continue,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '$' => TokenKind::Capture,
            '.' => {
                for _ in 0..2 {
                    if chars.next_if(|(_, c)| *c == '.').is_none() {
                        return Err(SyntaxError::pattern_compile(
                            offset,
                            "expected `...`",
                        ));
                    }
                }
                TokenKind::Rest
            }
            ':' => {
                let name = take_word(&mut chars);
                if name.is_empty() {
                    return Err(SyntaxError::pattern_compile(
                        offset,
                        "literal `:` must be followed by a name",
                    ));
                }
                TokenKind::Literal(name)
            }
            c if is_word_char(c) => {
                let mut word = String::from(c);
                word.push_str(&take_word(&mut chars));
                TokenKind::Word(word)
            }
            other => {
                return Err(SyntaxError::pattern_compile(
                    offset,
                    format!("unexpected character `{other}`"),
                ));
            }
        };
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

fn take_word(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
    let mut word = String::new();
    while let Some((_, ch)) = chars.next_if(|(_, c)| is_word_char(*c)) {
        word.push(ch);
    }
    word
}
