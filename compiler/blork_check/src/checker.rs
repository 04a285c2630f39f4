//! Compiled checkers.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use blork_value::Value;

use crate::ErrorFactory;

type Predicate = dyn Fn(&Value) -> bool + Send + Sync;

struct CheckerDef {
    description: String,
    predicate: Box<Predicate>,
    /// Derived from a type string rather than registered by name.
    derived: bool,
    /// Description reads ambiguously inside another description.
    needs_wrapping: bool,
    error: Option<ErrorFactory>,
}

/// A predicate with the description used in its failure message.
///
/// Immutable once built; clones share the same checker.
#[derive(Clone)]
pub struct Checker(Arc<CheckerDef>);

impl Checker {
    /// A named checker. Its failure message reads `Must be {description}`.
    pub fn new(
        description: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Checker::build(description.into(), Box::new(predicate), false, false, None)
    }

    /// A named checker that fails with `error` instead of the engine's factory.
    pub fn with_error(
        description: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        error: Option<ErrorFactory>,
    ) -> Self {
        Checker::build(description.into(), Box::new(predicate), false, false, error)
    }

    /// A checker compiled from a modifier (`!a`, `a+`, `a[]`, ...).
    pub(crate) fn derived(
        description: String,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        error: Option<ErrorFactory>,
    ) -> Self {
        Checker::build(description, Box::new(predicate), true, false, error)
    }

    /// A checker compiled from `a & b`, `a | b` or `a?`.
    pub(crate) fn combinator(
        description: String,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        error: Option<ErrorFactory>,
    ) -> Self {
        Checker::build(description, Box::new(predicate), true, true, error)
    }

    fn build(
        description: String,
        predicate: Box<Predicate>,
        derived: bool,
        needs_wrapping: bool,
        error: Option<ErrorFactory>,
    ) -> Self {
        Checker(Arc::new(CheckerDef {
            description,
            predicate,
            derived,
            needs_wrapping,
            error,
        }))
    }

    #[inline]
    pub fn check(&self, value: &Value) -> bool {
        (self.0.predicate)(value)
    }

    pub fn description(&self) -> &str {
        &self.0.description
    }

    pub fn is_derived(&self) -> bool {
        self.0.derived
    }

    pub fn needs_wrapping(&self) -> bool {
        self.0.needs_wrapping
    }

    pub fn error_factory(&self) -> Option<&ErrorFactory> {
        self.0.error.as_ref()
    }

    /// Description as it reads inside a modifier's description:
    /// parenthesized for `and`/`or`/optional checkers.
    pub fn embedded_description(&self) -> Cow<'_, str> {
        if self.needs_wrapping() {
            Cow::Owned(format!("({})", self.description()))
        } else {
            Cow::Borrowed(self.description())
        }
    }

    /// Description as an operand of `and`/`or`: parenthesized for any
    /// derived checker.
    pub fn operand_description(&self) -> Cow<'_, str> {
        if self.is_derived() {
            Cow::Owned(format!("({})", self.description()))
        } else {
            Cow::Borrowed(self.description())
        }
    }

    pub fn ptr_eq(&self, other: &Checker) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("description", &self.0.description)
            .field("derived", &self.0.derived)
            .field("custom_error", &self.0.error.is_some())
            .finish_non_exhaustive()
    }
}
