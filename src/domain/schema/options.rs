//! Validation behaviour switches

use serde::{Deserialize, Serialize};

/// Options controlling how strictly payloads are validated.
///
/// All switches default to off, which matches the tolerant behaviour the
/// ingestion API has always had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Run cross-field correlation checks after structural validation
    #[serde(default)]
    pub strict_correlations: bool,
    /// Only accept scalars of the exact JSON type; no string or bool coercion
    #[serde(default)]
    pub strict_scalars: bool,
    /// Fail on keys the entity does not declare instead of ignoring them
    #[serde(default)]
    pub reject_unknown_fields: bool,
}

impl ValidationOptions {
    /// Options with every check enabled and no scalar coercion
    pub fn strict() -> Self {
        Self {
            strict_correlations: true,
            strict_scalars: true,
            reject_unknown_fields: true,
        }
    }

    pub fn with_strict_correlations(mut self, enabled: bool) -> Self {
        self.strict_correlations = enabled;
        self
    }

    pub fn with_strict_scalars(mut self, enabled: bool) -> Self {
        self.strict_scalars = enabled;
        self
    }

    pub fn with_reject_unknown_fields(mut self, enabled: bool) -> Self {
        self.reject_unknown_fields = enabled;
        self
    }
}
