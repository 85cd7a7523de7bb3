//! Error types for counter storage
//!
//! - [`StoreError`]: raised by a [`DocumentStore`](crate::DocumentStore) backend
//! - [`CounterError`]: raised by a [`CounterStore`](crate::CounterStore) increment

use crate::space::CounterSpace;
use std::path::PathBuf;

/// Errors from a document store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Document changed since it was read (optimistic concurrency failure)
    #[error("counter document '{space}' was modified concurrently: expected version {expected}, found {found}")]
    Conflict {
        space: CounterSpace,
        expected: u64,
        found: u64,
    },

    /// Backend cannot be reached
    #[error("counter store unavailable: {0}")]
    Unavailable(String),

    /// IO error on a file-backed store
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted document cannot be decoded
    #[error("corrupt counter document {path}: {message}")]
    Corrupt { path: PathBuf, message: String },
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the transaction should simply be re-executed
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Errors from a counter increment
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    /// Scope key is blank
    #[error("invalid scope key: '{0}'")]
    InvalidScopeKey(String),

    /// Every attempt lost to a concurrent writer
    #[error("increment on '{space}' gave up after {attempts} conflicting attempts")]
    RetriesExhausted { space: CounterSpace, attempts: u32 },

    /// Backend failed for a reason other than a conflict
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl CounterError {
    /// Whether the store could not serve the increment at all
    ///
    /// Validation failures are the only errors that are not unavailability.
    #[inline]
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Self::InvalidScopeKey(_))
    }
}
