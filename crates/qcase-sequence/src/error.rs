//! Error types for id allocation

use qcase_counter::CounterError;
use qcase_model::ModelError;
use std::time::Duration;

/// Errors from [`SequenceAllocator::try_allocate`](crate::SequenceAllocator::try_allocate)
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// Request rejected before touching the store
    #[error("invalid sequence request: {0}")]
    Validation(#[from] ModelError),

    /// Counter store could not serve the increment
    #[error("counter unavailable: {0}")]
    Counter(#[from] CounterError),

    /// Store did not answer in time
    #[error("allocation timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

impl SequenceError {
    /// Whether the request itself was malformed
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Counter(e) => !e.is_unavailable(),
            Self::Timeout { .. } => false,
        }
    }
}
