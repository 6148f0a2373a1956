//! # Tokenizer
//!
//! Splits map text into quoted strings, bare words and braces.
//!
//! - `//` starts a comment that runs to the end of the line
//! - `"..."` is one token with the quotes removed (no escapes)
//! - `{` and `}` are tokens of their own
//! - anything else up to whitespace, a brace or a quote is a bare word

use crate::error::{Diagnostic, ParseError};

/// Kind of token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A quoted string or bare word.
    Text(String),
    /// `{`
    Open,
    /// `}`
    Close,
}

/// A token and the line it starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// 1-based line number.
    pub line: usize,
}

/// Tokenizes map text.
///
/// An unterminated quoted string is reported and kept as a token running
/// to the end of the input.
#[must_use]
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1usize;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '/' if chars.peek() == Some(&'/') => {
                // Comment: leave the newline for the line counter
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '{' => tokens.push(Token { kind: TokenKind::Open, line }),
            '}' => tokens.push(Token { kind: TokenKind::Close, line }),
            '"' => {
                let start = line;
                let mut text = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    match next {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\n' => {
                            line += 1;
                            text.push(next);
                        }
                        _ => text.push(next),
                    }
                }
                if !closed {
                    diagnostics.push(Diagnostic::new(start, ParseError::UnterminatedString));
                }
                tokens.push(Token {
                    kind: TokenKind::Text(text),
                    line: start,
                });
            }
            _ => {
                let mut text = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '{' | '}' | '"') {
                        break;
                    }
                    text.push(next);
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Text(text),
                    line,
                });
            }
        }
    }

    (tokens, diagnostics)
}
