//! Engine configuration.

/// What a shape does with value keys it does not declare.
///
/// Only applies to shapes without a `keys`/`values` marker; with a marker,
/// undeclared keys are checked against it instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExcessKeys {
    /// Ignore undeclared keys.
    #[default]
    Allow,
    /// Fail on the first undeclared key.
    Deny,
}

/// Matching options for one engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckConfig {
    pub excess_keys: ExcessKeys,
    /// Deepest list/shape nesting to follow. `None` leaves depth bounded
    /// only by the (growable) stack.
    pub max_depth: Option<usize>,
}

impl CheckConfig {
    /// Shapes reject undeclared keys.
    pub fn strict() -> Self {
        CheckConfig {
            excess_keys: ExcessKeys::Deny,
            ..CheckConfig::default()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}
