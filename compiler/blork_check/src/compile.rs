//! Compiling parsed type strings into checkers.
//!
//! Compilation is bottom-up through the registry: names resolve to
//! registered checkers, groups to their contents, and every other node is
//! looked up by its canonical rendering before being built, so a shared
//! sub-expression such as `str+` is compiled once per registry.
//!
//! # Descriptions
//!
//! Each modifier builds its description from its operands'. An operand is
//! parenthesized when it would otherwise read ambiguously:
//!
//! - inside `and`/`or`, any derived operand: `(non-empty string) or null`
//! - inside other modifiers, `and`/`or`/optional operands:
//!   `plain array containing (string or empty)`

use blork_grammar::{SizeRange, TypeAst};
use blork_stack::ensure_sufficient_stack;
use blork_value::Value;
use smallvec::SmallVec;

use crate::{Checker, CheckerRegistry, ConfigError};

type Operands = SmallVec<[Checker; 4]>;

/// Resolve `ast` to a checker, compiling and caching derived nodes.
pub(crate) fn compile(registry: &CheckerRegistry, ast: &TypeAst) -> Result<Checker, ConfigError> {
    ensure_sufficient_stack(|| match ast {
        TypeAst::Name(name) => registry
            .get(name)
            .ok_or_else(|| ConfigError::UnknownChecker {
                name: name.to_string(),
            }),
        TypeAst::Group(inner) => compile(registry, inner),
        _ => {
            let key = ast.to_string();
            if let Some(checker) = registry.get(&key) {
                tracing::trace!(type_str = %key, "reusing compiled checker");
                return Ok(checker);
            }
            let checker = build(registry, ast)?;
            tracing::debug!(
                type_str = %key,
                description = checker.description(),
                "compiled checker"
            );
            Ok(registry.cache(&key, checker))
        }
    })
}

fn operands(registry: &CheckerRegistry, items: &[TypeAst]) -> Result<Operands, ConfigError> {
    items.iter().map(|item| compile(registry, item)).collect()
}

fn join_operands(checkers: &[Checker], separator: &str) -> String {
    checkers
        .iter()
        .map(|checker| checker.operand_description())
        .collect::<Vec<_>>()
        .join(separator)
}

fn size_phrase(range: SizeRange) -> String {
    match range {
        SizeRange::Exact(n) => format!("with size {n}"),
        SizeRange::AtLeast(n) => format!("with minimum size {n}"),
        SizeRange::AtMost(n) => format!("with maximum size {n}"),
        SizeRange::Between(min, max) => format!("with size between {min} and {max}"),
    }
}

fn build(registry: &CheckerRegistry, ast: &TypeAst) -> Result<Checker, ConfigError> {
    let checker = match ast {
        TypeAst::Name(_) | TypeAst::Group(_) => return compile(registry, ast),

        TypeAst::And(items) => {
            let checkers = operands(registry, items)?;
            let description = join_operands(&checkers, " and ");
            Checker::combinator(
                description,
                move |value| checkers.iter().all(|c| c.check(value)),
                None,
            )
        }

        TypeAst::Or(items) => {
            let checkers = operands(registry, items)?;
            let description = join_operands(&checkers, " or ");
            Checker::combinator(
                description,
                move |value| checkers.iter().any(|c| c.check(value)),
                None,
            )
        }

        TypeAst::Tuple(items) => {
            let checkers = operands(registry, items)?;
            let description = format!(
                "plain array tuple containing {}",
                checkers
                    .iter()
                    .map(Checker::description)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Checker::derived(
                description,
                move |value| match value {
                    Value::Array(items) => {
                        let items = items.snapshot();
                        items.len() == checkers.len()
                            && items.iter().zip(&checkers).all(|(item, c)| c.check(item))
                    }
                    _ => false,
                },
                None,
            )
        }

        TypeAst::Array(inner) => {
            let element = compile(registry, inner)?;
            let description = format!("plain array containing {}", element.embedded_description());
            Checker::derived(
                description,
                move |value| match value {
                    Value::Array(items) => items.snapshot().iter().all(|item| element.check(item)),
                    _ => false,
                },
                None,
            )
        }

        TypeAst::Object { key, value } => {
            let values = compile(registry, value)?;
            let keys = key
                .as_deref()
                .map(|key| compile(registry, key))
                .transpose()?;
            let description = match &keys {
                Some(keys) => format!(
                    "plain object with {} keys containing {}",
                    keys.embedded_description(),
                    values.embedded_description()
                ),
                None => format!("plain object containing {}", values.embedded_description()),
            };
            Checker::derived(
                description,
                move |value| match value {
                    Value::Object(object) if value.is_plain_object() => {
                        let entries = object.read().entries();
                        entries.iter().all(|(k, v)| {
                            keys.as_ref()
                                .map_or(true, |keys| keys.check(&Value::Str(k.clone())))
                                && values.check(v)
                        })
                    }
                    _ => false,
                },
                None,
            )
        }

        TypeAst::Invert(inner) => {
            let inner = compile(registry, inner)?;
            let description = format!("anything except {}", inner.embedded_description());
            let error = inner.error_factory().cloned();
            Checker::derived(description, move |value| !inner.check(value), error)
        }

        TypeAst::NonEmpty(inner) => {
            let inner = compile(registry, inner)?;
            let description = format!("non-empty {}", inner.embedded_description());
            let error = inner.error_factory().cloned();
            Checker::derived(
                description,
                move |value| inner.check(value) && !value.is_empty(),
                error,
            )
        }

        TypeAst::Optional(inner) => {
            let inner = compile(registry, inner)?;
            let description = format!("{} or empty", inner.embedded_description());
            let error = inner.error_factory().cloned();
            Checker::combinator(
                description,
                move |value| value.is_undefined() || inner.check(value),
                error,
            )
        }

        TypeAst::Size { inner, range } => {
            let inner = compile(registry, inner)?;
            let range = *range;
            let description = format!("{} {}", inner.embedded_description(), size_phrase(range));
            let error = inner.error_factory().cloned();
            Checker::derived(
                description,
                move |value| {
                    inner.check(value) && value.size().is_some_and(|size| range.contains(size))
                },
                error,
            )
        }
    };
    Ok(checker)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
