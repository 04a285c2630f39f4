//! Grammar for blork type strings.
//!
//! A type string such as `"str & lower+"` or `"{ camel: (int | str)[] }"`
//! is lexed with logos and parsed by recursive descent into a [`TypeAst`].
//!
//! # Precedence (loosest first)
//!
//! | Level | Forms |
//! |---|---|
//! | or | `a \| b` |
//! | and | `a & b` |
//! | prefix | `!a` |
//! | postfix | `a?` `a+` `a[]` `a{min,max}` |
//! | primary | `name` `(expr)` `[a, b]` `{a}` `{k: v}` |
//!
//! Groups may not nest: a `(` inside an open group is an error even when
//! brackets or braces sit between the two.
//!
//! The `Display` rendering of a [`TypeAst`] is canonical and parses back to
//! an equal tree.

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{SizeRange, TypeAst};
pub use error::{GrammarError, GrammarErrorKind};

/// Parse a type string.
pub fn parse(source: &str) -> Result<TypeAst, GrammarError> {
    let tokens = lexer::lex(source)?;
    parser::Parser::new(source, &tokens).parse()
}
