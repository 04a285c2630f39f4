//! The validation engine.

use blork_check::{
    default_error_factory, CheckConfig, CheckError, Checker, CheckerRegistry, ConfigError,
    ErrorFactory, Matcher, TypeExpr, ValueFailure,
};
use blork_value::Value;
use parking_lot::RwLock;

/// Prefix used by [`Blork::args`].
pub const ARGS_PREFIX: &str = "arguments";

/// An independent validation engine.
///
/// Owns its checker registry and error factory: checkers added to one engine
/// are invisible to every other. Safe to share across threads; registration
/// and checking may interleave.
pub struct Blork {
    registry: CheckerRegistry,
    error: RwLock<ErrorFactory>,
    config: CheckConfig,
}

impl Blork {
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    pub fn with_config(config: CheckConfig) -> Self {
        Blork {
            registry: CheckerRegistry::new(),
            error: RwLock::new(default_error_factory()),
            config,
        }
    }

    pub fn config(&self) -> CheckConfig {
        self.config
    }

    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    /// Check `value` against `ty`.
    ///
    /// `prefix` names the value in failure messages; nested failures extend
    /// it (`user.addresses[2].zip`).
    pub fn check(
        &self,
        value: &Value,
        ty: impl Into<TypeExpr>,
        prefix: &str,
    ) -> Result<(), CheckError> {
        let error = self.error.read().clone();
        self.check_with(value, ty, prefix, &error)
    }

    /// [`Blork::check`] with `error` in place of the engine's error factory.
    pub fn check_with(
        &self,
        value: &Value,
        ty: impl Into<TypeExpr>,
        prefix: &str,
        error: &ErrorFactory,
    ) -> Result<(), CheckError> {
        Matcher::new(&self.registry, error, self.config).check(value, &ty.into(), prefix)
    }

    /// Check positional arguments, named `arguments[i]` in failures.
    ///
    /// Missing arguments read as `undefined`; more arguments than types fail.
    pub fn args(&self, values: &[Value], types: &[TypeExpr]) -> Result<(), CheckError> {
        self.args_as(values, types, ARGS_PREFIX)
    }

    /// [`Blork::args`] with a custom prefix.
    pub fn args_as(
        &self,
        values: &[Value],
        types: &[TypeExpr],
        prefix: &str,
    ) -> Result<(), CheckError> {
        let error = self.error.read().clone();
        Matcher::new(&self.registry, &error, self.config).check_args(values, types, prefix)
    }

    /// Register a named checker.
    ///
    /// `description` (default: the name) completes `Must be ...` in failures;
    /// `error` replaces the engine's factory for this checker and everything
    /// derived from it by unary modifiers.
    pub fn add(
        &self,
        name: &str,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        description: Option<&str>,
        error: Option<ErrorFactory>,
    ) -> Result<Checker, ConfigError> {
        self.registry.register(name, predicate, description, error)
    }

    /// Replace the error factory for value failures.
    pub fn throws(&self, error: ErrorFactory) {
        *self.error.write() = error;
        tracing::debug!("error factory replaced");
    }

    /// Fail with `Must {description}` unless `condition` holds.
    pub fn assert(&self, condition: bool, description: &str, prefix: &str) -> Result<(), CheckError> {
        if condition {
            return Ok(());
        }
        let failure = ValueFailure::new(format!("Must {description}"), None, prefix);
        let error = self.error.read().clone();
        Err(CheckError::Value(error(failure)))
    }

    /// The compiled checker for a name or type string.
    pub fn checker(&self, type_str: &str) -> Result<Checker, ConfigError> {
        self.registry.get_or_compile(type_str)
    }
}

impl Default for Blork {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
