//! Tokenizer for type strings.

use std::ops::Range;

use logos::Logos;

use crate::{GrammarError, GrammarErrorKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum TokenKind {
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,
    #[token("+")]
    Plus,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    #[regex("[0-9]+")]
    Int,

    /// Checker name. A leading sign is part of the name (`+int`, `-num`),
    /// and inner hyphens join kebab segments (`my-checker`).
    #[regex(r"[+-]?[A-Za-z_][A-Za-z0-9_]*(-[A-Za-z0-9_]+)*")]
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

pub(crate) fn lex(source: &str) -> Result<Vec<Token>, GrammarError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                let found = source[span.clone()].chars().next().unwrap_or('\u{fffd}');
                return Err(GrammarError::new(
                    GrammarErrorKind::InvalidCharacter { found },
                    span,
                ));
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
