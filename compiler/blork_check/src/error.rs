//! Error types.
//!
//! # Two Failure Kinds
//!
//! - [`ConfigError`]: the type expression is wrong (unknown checker,
//!   malformed string, circular type, bad registration). Always returned as
//!   `CheckError::Config`, never routed through an error factory.
//! - Value failures: the value does not satisfy a well-formed type. The
//!   engine describes the failure as a [`ValueFailure`] and hands it to the
//!   active [`ErrorFactory`], whose error lands in `CheckError::Value`.

use std::error::Error;
use std::fmt::Write;
use std::sync::Arc;

use blork_grammar::GrammarError;
use blork_value::Value;

/// Caller-chosen error type for value failures.
pub type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// Builds the error raised for a value failure.
pub type ErrorFactory = Arc<dyn Fn(ValueFailure) -> BoxedError + Send + Sync>;

/// A malformed type or registration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Blork type `{name}` does not exist")]
    UnknownChecker { name: String },
    #[error("Blork type `{name}` already exists")]
    DuplicateChecker { name: String },
    #[error("Blork type name `{name}` must be kebab-case")]
    InvalidName { name: String },
    #[error("Blork type must not contain circular references")]
    CircularType,
    #[error("Blork type must be a string, literal, class, list or shape (received {found})")]
    InvalidType { found: String },
    #[error("Blork type `{type_str}` is malformed: {source}")]
    Syntax {
        type_str: String,
        source: GrammarError,
    },
    #[error("Blork type nesting exceeds the depth limit of {limit}")]
    DepthExceeded { limit: usize },
}

/// Everything known about a value failure.
#[derive(Clone, Debug)]
pub struct ValueFailure {
    /// What was expected, e.g. `Must be non-empty string`.
    pub reason: String,
    /// The offending value; `None` for assertions.
    pub value: Option<Value>,
    /// Path to the offending value, e.g. `user.addresses[2].zip`.
    pub prefix: String,
}

impl ValueFailure {
    pub fn new(reason: impl Into<String>, value: Option<Value>, prefix: impl Into<String>) -> Self {
        ValueFailure {
            reason: reason.into(),
            value,
            prefix: prefix.into(),
        }
    }

    /// `prefix: reason (received value)`, leaving out empty parts.
    pub fn message(&self) -> String {
        let mut message = String::new();
        if !self.prefix.is_empty() {
            message.push_str(&self.prefix);
            message.push_str(": ");
        }
        message.push_str(&self.reason);
        if let Some(value) = &self.value {
            let _ = write!(message, " (received {})", value.debug());
        }
        message
    }
}

/// Default error for value failures.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct ValueError {
    pub message: String,
    pub reason: String,
    pub prefix: String,
    pub value: Option<Value>,
}

impl From<ValueFailure> for ValueError {
    fn from(failure: ValueFailure) -> Self {
        ValueError {
            message: failure.message(),
            reason: failure.reason,
            prefix: failure.prefix,
            value: failure.value,
        }
    }
}

/// Factory producing [`ValueError`].
pub fn default_error_factory() -> ErrorFactory {
    error_factory(ValueError::from)
}

/// Wrap a constructor of a concrete error type as an [`ErrorFactory`].
///
/// ```text
/// engine.throws(error_factory(|failure| MyError(failure.message())));
/// ```
pub fn error_factory<E>(build: impl Fn(ValueFailure) -> E + Send + Sync + 'static) -> ErrorFactory
where
    E: Error + Send + Sync + 'static,
{
    Arc::new(move |failure: ValueFailure| -> BoxedError { Box::new(build(failure)) })
}

/// Error from a check.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Built by the active [`ErrorFactory`].
    #[error("{0}")]
    Value(BoxedError),
}

impl CheckError {
    pub fn is_config(&self) -> bool {
        matches!(self, CheckError::Config(_))
    }

    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            CheckError::Config(err) => Some(err),
            CheckError::Value(_) => None,
        }
    }

    /// The factory-built error, if it is an `E`.
    pub fn downcast_value<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            CheckError::Value(err) => err.downcast_ref::<E>(),
            CheckError::Config(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
