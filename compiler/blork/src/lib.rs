//! Runtime value validation driven by compact type strings.
//!
//! ```text
//! blork::check(&user, TypeExpr::shape([("name", "str+"), ("age", "int & +int")]), "user")?;
//! blork::check(&tags, "lower+[] | null", "tags")?;
//! ```
//!
//! # Type Strings
//!
//! | Form | Meaning |
//! |------|---------|
//! | `name` | registered checker |
//! | `a?` | `a`, or `undefined` |
//! | `a+` | non-empty `a` |
//! | `a{n}`, `a{min,}`, `a{,max}`, `a{min,max}` | `a` with a size in range |
//! | `!a` | anything except `a` |
//! | `a & b` | both |
//! | `a \| b` | either; looser than `&` |
//! | `(a)` | grouping, not nested |
//! | `a[]` | plain array of `a` |
//! | `[a, b]` | tuple of exactly `a` then `b` |
//! | `{a}`, `{k: a}` | plain object of `a` values, keys optionally `k` |
//!
//! # Engines
//!
//! [`Blork`] owns a checker registry and an error factory. [`blork()`] makes
//! a fresh engine; the free functions below share one default engine.
//!
//! # Debugging
//!
//! Set `RUST_LOG=blork_check=debug` and call [`init_tracing`] to log each
//! compiled type string and registered checker.

use std::sync::{Once, OnceLock};

mod engine;

pub use blork_check::{
    default_error_factory, error_factory, BoxedError, CheckConfig, CheckError, Checker,
    CheckerRegistry, ConfigError, ErrorFactory, ExcessKeys, TypeExpr, TypeList, TypeShape,
    ValueError, ValueFailure,
};
pub use blork_grammar::{GrammarError, GrammarErrorKind};
pub use blork_value::{Class, Value};
pub use engine::{Blork, ARGS_PREFIX};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`. Does nothing when it is unset, and
/// only the first call has an effect. A subscriber the host program already
/// installed is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

static DEFAULT_ENGINE: OnceLock<Blork> = OnceLock::new();

/// A new, independent engine.
pub fn blork() -> Blork {
    Blork::new()
}

/// The shared engine behind the free functions.
pub fn default_engine() -> &'static Blork {
    DEFAULT_ENGINE.get_or_init(Blork::new)
}

/// [`Blork::check`] on the default engine.
pub fn check(value: &Value, ty: impl Into<TypeExpr>, prefix: &str) -> Result<(), CheckError> {
    default_engine().check(value, ty, prefix)
}

/// [`Blork::args`] on the default engine.
pub fn args(values: &[Value], types: &[TypeExpr]) -> Result<(), CheckError> {
    default_engine().args(values, types)
}

/// [`Blork::add`] on the default engine.
pub fn add(
    name: &str,
    predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    description: Option<&str>,
    error: Option<ErrorFactory>,
) -> Result<Checker, ConfigError> {
    default_engine().add(name, predicate, description, error)
}

/// [`Blork::throws`] on the default engine.
pub fn throws(error: ErrorFactory) {
    default_engine().throws(error);
}

/// [`Blork::assert`] on the default engine.
pub fn assert(condition: bool, description: &str, prefix: &str) -> Result<(), CheckError> {
    default_engine().assert(condition, description, prefix)
}

/// [`Blork::checker`] on the default engine.
pub fn checker(type_str: &str) -> Result<Checker, ConfigError> {
    default_engine().checker(type_str)
}
