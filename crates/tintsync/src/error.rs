//! Error types for the engine.
//!
//! Reconciles never return these to callers of
//! [`ReconcileEngine::request_reconcile`](crate::ReconcileEngine::request_reconcile);
//! a failed store operation ends up as
//! [`ReconcileOutcome::Failed`](crate::ReconcileOutcome::Failed) and in
//! [`ReconcileStatus::last_error`](crate::ReconcileStatus::last_error).

use std::path::PathBuf;

use thiserror::Error;
use tintsync_settings::SettingsError;

/// Errors raised by a [`SettingsStore`](crate::SettingsStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("cannot access settings at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored text is not a usable settings document.
    #[error(transparent)]
    Document(#[from] SettingsError),

    /// The document could not be serialized for writing.
    #[error("cannot serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The store refused the write (read-only location, policy, ...).
    #[error("settings write rejected: {0}")]
    Rejected(String),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML syntax or shape error.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON syntax or shape error.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A blend factor outside `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    FactorOutOfRange { field: String, value: f64 },

    /// A guard with `maxWrites` of zero would block every write.
    #[error("guard maxWrites must be at least 1")]
    ZeroMaxWrites,
}
