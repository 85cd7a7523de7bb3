//! Error types for QCase Core

use qcase_access::AccessError;
use qcase_counter::{CounterError, StoreError};
use qcase_model::ModelError;
use qcase_sequence::SequenceError;
use std::path::PathBuf;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input rejected
    #[error("validation failed: {0}")]
    Validation(#[from] ModelError),

    /// Id allocation failed
    #[error("sequence error: {0}")]
    Sequence(#[from] SequenceError),

    /// Counter store failed
    #[error("counter error: {0}")]
    Counter(#[from] CounterError),

    /// Counter backend failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Filtered view unavailable
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// Actor lacks the role for the operation
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Administrators cannot delete themselves
    #[error("refusing to delete the requesting user")]
    SelfDeletion,

    /// Referenced entity does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Entity with the same natural key already exists
    #[error("{kind} already exists: {id}")]
    Duplicate { kind: &'static str, id: String },
}

impl CaseError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create not-found error
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Whether the caller supplied bad input
    #[inline]
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::PermissionDenied(_)
                | Self::SelfDeletion
                | Self::NotFound { .. }
                | Self::Duplicate { .. }
        )
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CaseError>;
