//! Checker registry.
//!
//! Maps names to checkers. Grows monotonically: named checkers are added by
//! [`CheckerRegistry::register`], derived checkers by the compiler the first
//! time a type string is seen. Nothing is ever removed or replaced.

use std::sync::Arc;

use blork_value::Value;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::builtins::{builtin_checkers, is_kebab};
use crate::{compile, Checker, ConfigError, ErrorFactory};

/// Name → checker table owned by one engine.
///
/// Internally synchronized: lookups take a read lock, registration and
/// caching a short write lock. No lock is held while compiling.
pub struct CheckerRegistry {
    checkers: RwLock<FxHashMap<Arc<str>, Checker>>,
}

impl CheckerRegistry {
    /// A registry seeded with the built-in checkers.
    pub fn new() -> Self {
        CheckerRegistry {
            checkers: RwLock::new(builtin_checkers()),
        }
    }

    /// Look up a checker by name or cached type string.
    pub fn get(&self, name: &str) -> Option<Checker> {
        self.checkers.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checkers.read().contains_key(name)
    }

    /// Number of entries, aliases and cached type strings included.
    pub fn len(&self) -> usize {
        self.checkers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.read().is_empty()
    }

    /// Every entry's key, sorted.
    pub fn names(&self) -> Vec<Arc<str>> {
        let mut names: Vec<_> = self.checkers.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Add a named checker.
    ///
    /// The name must be kebab-case and unused. A missing or empty
    /// `description` defaults to the name; `error` replaces the engine's
    /// error factory for this checker.
    pub fn register(
        &self,
        name: &str,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        description: Option<&str>,
        error: Option<ErrorFactory>,
    ) -> Result<Checker, ConfigError> {
        if !is_kebab(name) {
            return Err(ConfigError::InvalidName {
                name: name.to_owned(),
            });
        }
        let description = description.filter(|d| !d.is_empty()).unwrap_or(name);

        let mut checkers = self.checkers.write();
        if checkers.contains_key(name) {
            return Err(ConfigError::DuplicateChecker {
                name: name.to_owned(),
            });
        }
        let checker = Checker::with_error(description, predicate, error);
        checkers.insert(Arc::from(name), checker.clone());
        tracing::debug!(name, description, "registered checker");
        Ok(checker)
    }

    /// The checker for a name or type string, compiling and caching it on
    /// first use.
    pub fn get_or_compile(&self, type_str: &str) -> Result<Checker, ConfigError> {
        if let Some(checker) = self.get(type_str) {
            return Ok(checker);
        }
        let ast = blork_grammar::parse(type_str).map_err(|source| ConfigError::Syntax {
            type_str: type_str.to_owned(),
            source,
        })?;
        let checker = compile::compile(self, &ast)?;
        Ok(self.cache(type_str, checker))
    }

    /// Store a compiled checker under `key`, keeping an existing entry if
    /// another caller got there first. Returns the stored checker.
    pub(crate) fn cache(&self, key: &str, checker: Checker) -> Checker {
        self.checkers
            .write()
            .entry(Arc::from(key))
            .or_insert(checker)
            .clone()
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
