//! Checking runtime values against blork types.
//!
//! - [`CheckerRegistry`] maps names to compiled [`Checker`]s. It is seeded
//!   with the built-in checkers and caches every checker compiled from a type
//!   string.
//! - The compiler turns a parsed type string into a [`Checker`], resolving
//!   names and sub-expressions through the registry.
//! - [`Matcher`] walks a value against a [`TypeExpr`], which may be a type
//!   string, a literal, a class, a list or a shape. Cycles in the value are
//!   accepted; cycles in the type are a configuration error.
//!
//! Failures are either a [`ConfigError`] (the type is wrong) or a value
//! failure built by the active [`ErrorFactory`] (the value is wrong). See
//! [`CheckError`].

mod builtins;
mod checker;
mod compile;
mod config;
mod error;
mod matcher;
mod registry;
mod types;

pub use checker::Checker;
pub use config::{CheckConfig, ExcessKeys};
pub use error::{
    default_error_factory, error_factory, BoxedError, CheckError, ConfigError, ErrorFactory,
    ValueError, ValueFailure,
};
pub use matcher::Matcher;
pub use registry::CheckerRegistry;
pub use types::{TypeExpr, TypeList, TypeShape};
