//! Parsed type strings.

use std::fmt;
use std::sync::Arc;

/// Syntax tree of a type string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeAst {
    /// A registered checker, e.g. `str` or `+int`.
    Name(Arc<str>),
    /// `(expr)`.
    Group(Box<TypeAst>),
    /// `a & b & ...`, two or more operands.
    And(Vec<TypeAst>),
    /// `a | b | ...`, two or more operands.
    Or(Vec<TypeAst>),
    /// `[a, b, ...]`, exact length.
    Tuple(Vec<TypeAst>),
    /// `a[]`.
    Array(Box<TypeAst>),
    /// `{value}` or `{key: value}`.
    Object {
        key: Option<Box<TypeAst>>,
        value: Box<TypeAst>,
    },
    /// `!a`.
    Invert(Box<TypeAst>),
    /// `a+`.
    NonEmpty(Box<TypeAst>),
    /// `a?`.
    Optional(Box<TypeAst>),
    /// `a{min,max}`.
    Size { inner: Box<TypeAst>, range: SizeRange },
}

/// Bounds of a size-range modifier. Both ends are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeRange {
    /// `{n}`
    Exact(u64),
    /// `{n,}`
    AtLeast(u64),
    /// `{,n}`
    AtMost(u64),
    /// `{min,max}`
    Between(u64, u64),
}

impl SizeRange {
    #[expect(clippy::cast_precision_loss, reason = "bounds beyond 2^53 are not meaningful sizes")]
    pub fn contains(self, size: f64) -> bool {
        let (min, max) = match self {
            SizeRange::Exact(n) => (Some(n), Some(n)),
            SizeRange::AtLeast(n) => (Some(n), None),
            SizeRange::AtMost(n) => (None, Some(n)),
            SizeRange::Between(min, max) => (Some(min), Some(max)),
        };
        min.map_or(true, |min| size >= min as f64) && max.map_or(true, |max| size <= max as f64)
    }
}

impl fmt::Display for SizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeRange::Exact(n) => write!(f, "{{{n}}}"),
            SizeRange::AtLeast(n) => write!(f, "{{{n},}}"),
            SizeRange::AtMost(n) => write!(f, "{{,{n}}}"),
            SizeRange::Between(min, max) => write!(f, "{{{min},{max}}}"),
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, items: &[TypeAst], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAst::Name(name) => f.write_str(name),
            TypeAst::Group(inner) => write!(f, "({inner})"),
            TypeAst::And(items) => join(f, items, " & "),
            TypeAst::Or(items) => join(f, items, " | "),
            TypeAst::Tuple(items) => {
                f.write_str("[")?;
                join(f, items, ", ")?;
                f.write_str("]")
            }
            TypeAst::Array(inner) => write!(f, "{inner}[]"),
            TypeAst::Object { key: None, value } => write!(f, "{{{value}}}"),
            TypeAst::Object {
                key: Some(key),
                value,
            } => write!(f, "{{{key}: {value}}}"),
            TypeAst::Invert(inner) => write!(f, "!{inner}"),
            TypeAst::NonEmpty(inner) => write!(f, "{inner}+"),
            TypeAst::Optional(inner) => write!(f, "{inner}?"),
            TypeAst::Size { inner, range } => write!(f, "{inner}{range}"),
        }
    }
}
