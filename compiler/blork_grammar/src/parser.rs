//! Recursive-descent parser.
//!
//! One method per precedence level, loosest first:
//! `parse_or` → `parse_and` → `parse_unary` → `parse_postfix` → `parse_primary`.

use std::sync::Arc;

use blork_stack::ensure_sufficient_stack;

use crate::lexer::{Token, TokenKind};
use crate::{GrammarError, GrammarErrorKind, SizeRange, TypeAst};

pub(crate) struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    /// Groups open on the current path; a second one is rejected.
    open_groups: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Parser {
            source,
            tokens,
            pos: 0,
            open_groups: 0,
        }
    }

    /// Parse the whole token stream as one type.
    pub fn parse(mut self) -> Result<TypeAst, GrammarError> {
        if self.tokens.is_empty() {
            return Err(GrammarError::new(
                GrammarErrorKind::Empty,
                0..self.source.len(),
            ));
        }
        let ast = self.parse_or()?;
        if self.current().is_some() {
            return Err(self.unexpected("`&`, `|` or end of type"));
        }
        Ok(ast)
    }

    // Cursor

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<&'a Token, GrammarError> {
        if self.check(kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.unexpected(expected))
    }

    fn slice(&self, token: &Token) -> &'a str {
        &self.source[token.span.clone()]
    }

    fn unexpected(&self, expected: &'static str) -> GrammarError {
        match self.current() {
            Some(token) => GrammarError::new(
                GrammarErrorKind::UnexpectedToken {
                    found: self.slice(token).to_owned(),
                    expected,
                },
                token.span.clone(),
            ),
            None => GrammarError::new(
                GrammarErrorKind::UnexpectedEnd { expected },
                self.source.len()..self.source.len(),
            ),
        }
    }

    // Precedence levels

    fn parse_or(&mut self) -> Result<TypeAst, GrammarError> {
        ensure_sufficient_stack(|| {
            let first = self.parse_and()?;
            if !self.check(TokenKind::Pipe) {
                return Ok(first);
            }
            let mut items = vec![first];
            while self.eat(TokenKind::Pipe) {
                items.push(self.parse_and()?);
            }
            Ok(TypeAst::Or(items))
        })
    }

    fn parse_and(&mut self) -> Result<TypeAst, GrammarError> {
        let first = self.parse_unary()?;
        if !self.check(TokenKind::Amp) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(TokenKind::Amp) {
            items.push(self.parse_unary()?);
        }
        Ok(TypeAst::And(items))
    }

    /// Inversion binds looser than `?`, `+` and sizes, but a trailing run of
    /// `[]` applies outside it: `!a+` is `!(a+)` while `!a[]` is `(!a)[]`.
    fn parse_unary(&mut self) -> Result<TypeAst, GrammarError> {
        let mut inverts = 0usize;
        while self.eat(TokenKind::Bang) {
            inverts += 1;
        }
        let mut ast = self.parse_postfix()?;
        if inverts == 0 {
            return Ok(ast);
        }
        let mut arrays = 0usize;
        while let TypeAst::Array(inner) = ast {
            ast = *inner;
            arrays += 1;
        }
        for _ in 0..inverts {
            ast = TypeAst::Invert(Box::new(ast));
        }
        for _ in 0..arrays {
            ast = TypeAst::Array(Box::new(ast));
        }
        Ok(ast)
    }

    fn parse_postfix(&mut self) -> Result<TypeAst, GrammarError> {
        let mut ast = self.parse_primary()?;
        while let Some(token) = self.current() {
            ast = match token.kind {
                TokenKind::Question => {
                    self.pos += 1;
                    TypeAst::Optional(Box::new(ast))
                }
                TokenKind::Plus => {
                    self.pos += 1;
                    TypeAst::NonEmpty(Box::new(ast))
                }
                TokenKind::LBracket => {
                    self.pos += 1;
                    self.expect(TokenKind::RBracket, "`]`")?;
                    TypeAst::Array(Box::new(ast))
                }
                TokenKind::LBrace => {
                    let range = self.parse_size()?;
                    TypeAst::Size {
                        inner: Box::new(ast),
                        range,
                    }
                }
                _ => break,
            };
        }
        Ok(ast)
    }

    fn parse_primary(&mut self) -> Result<TypeAst, GrammarError> {
        let Some(token) = self.current() else {
            return Err(self.unexpected("a type"));
        };
        match token.kind {
            TokenKind::Name => {
                self.pos += 1;
                Ok(TypeAst::Name(Arc::from(self.slice(token))))
            }
            TokenKind::LParen => {
                if self.open_groups > 0 {
                    return Err(GrammarError::new(
                        GrammarErrorKind::NestedGroup,
                        token.span.clone(),
                    ));
                }
                self.pos += 1;
                self.open_groups += 1;
                let inner = self.parse_or()?;
                self.expect(TokenKind::RParen, "`)`")?;
                self.open_groups -= 1;
                Ok(TypeAst::Group(Box::new(inner)))
            }
            TokenKind::LBracket => {
                self.pos += 1;
                let mut items = vec![self.parse_or()?];
                while self.eat(TokenKind::Comma) {
                    items.push(self.parse_or()?);
                }
                self.expect(TokenKind::RBracket, "`,` or `]`")?;
                Ok(TypeAst::Tuple(items))
            }
            TokenKind::LBrace => {
                self.pos += 1;
                let first = self.parse_or()?;
                let ast = if self.eat(TokenKind::Colon) {
                    TypeAst::Object {
                        key: Some(Box::new(first)),
                        value: Box::new(self.parse_or()?),
                    }
                } else {
                    TypeAst::Object {
                        key: None,
                        value: Box::new(first),
                    }
                };
                self.expect(TokenKind::RBrace, "`:` or `}`")?;
                Ok(ast)
            }
            _ => Err(self.unexpected("a type")),
        }
    }

    /// `{n}`, `{min,}`, `{,max}` or `{min,max}`, cursor on the `{`.
    fn parse_size(&mut self) -> Result<SizeRange, GrammarError> {
        let start = self.current().map_or(self.source.len(), |t| t.span.start);
        self.pos += 1;

        let min = self.size_bound();
        let comma = self.eat(TokenKind::Comma);
        let max = self.size_bound();
        let closed = self.eat(TokenKind::RBrace);

        let range = match (min, comma, max) {
            (Some(Some(n)), false, None) => Some(SizeRange::Exact(n)),
            (Some(Some(n)), true, None) => Some(SizeRange::AtLeast(n)),
            (None, true, Some(Some(n))) => Some(SizeRange::AtMost(n)),
            (Some(Some(min)), true, Some(Some(max))) if min <= max => {
                Some(SizeRange::Between(min, max))
            }
            _ => None,
        };
        match range {
            Some(range) if closed => Ok(range),
            _ => {
                let end = if closed {
                    self.tokens[self.pos - 1].span.end
                } else {
                    self.current().map_or(self.source.len(), |t| t.span.end)
                };
                Err(GrammarError::new(
                    GrammarErrorKind::InvalidSize {
                        found: self.source[start..end].to_owned(),
                    },
                    start..end,
                ))
            }
        }
    }

    /// An integer bound if one is next. The inner `None` is an out-of-range literal.
    fn size_bound(&mut self) -> Option<Option<u64>> {
        if !self.check(TokenKind::Int) {
            return None;
        }
        let token = self.advance()?;
        Some(self.slice(token).parse().ok())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
