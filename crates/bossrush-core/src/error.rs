//! Error types for authoring-time validation and spawn-time lookups.
//!
//! Nothing in the tick path returns these to the caller as fatal: spawn
//! failures are logged and the spawn is skipped.

use thiserror::Error;

/// Problems found while loading or validating an encounter.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read encounter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse encounter: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("spec '{name}' referenced by {referenced_by} is not defined")]
    MissingSpec { name: String, referenced_by: String },

    #[error("spec '{spec}' lists child '{child}' which is not defined")]
    MissingChild { spec: String, child: String },

    #[error("spec '{spec}' is defined more than once")]
    DuplicateSpec { spec: String },

    #[error("{owner}: invalid {field}: {reason}")]
    InvalidValue {
        owner: String,
        field: &'static str,
        reason: String,
    },
}

/// A spawn request that cannot be honoured with the configured specs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("misconfigured spec '{spec}': {reason}")]
    MisconfiguredSpec { spec: String, reason: String },
}

impl SpawnError {
    pub fn misconfigured(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        SpawnError::MisconfiguredSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}
