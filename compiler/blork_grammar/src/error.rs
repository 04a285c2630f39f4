//! Grammar errors.

use std::ops::Range;

/// What went wrong while reading a type string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarErrorKind {
    #[error("type string is empty")]
    Empty,
    #[error("unexpected character `{found}`")]
    InvalidCharacter { found: char },
    #[error("expected {expected}, found `{found}`")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
    },
    #[error("expected {expected}, found end of type")]
    UnexpectedEnd { expected: &'static str },
    #[error("groups must not be nested")]
    NestedGroup,
    #[error("invalid size range `{found}`")]
    InvalidSize { found: String },
}

/// A grammar error and the byte range of the type string it concerns.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {}..{}", .span.start, .span.end)]
pub struct GrammarError {
    pub kind: GrammarErrorKind,
    pub span: Range<usize>,
}

impl GrammarError {
    pub(crate) fn new(kind: GrammarErrorKind, span: Range<usize>) -> Self {
        GrammarError { kind, span }
    }
}
