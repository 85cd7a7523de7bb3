//! Transactional counter store
//!
//! An increment is a pure function of the current document (read value,
//! add one, write back) applied through compare-and-swap. When a concurrent
//! writer wins the race the whole read-modify-write is re-executed against
//! the new document, up to the [`RetryPolicy`] bound.

use crate::backend::DocumentStore;
use crate::document::CounterDocument;
use crate::error::CounterError;
use crate::retry::RetryPolicy;
use crate::space::{CounterSpace, ScopeKey};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Atomic per-scope counters
///
/// For a fixed `(space, key)` the values returned across all callers are
/// exactly `1, 2, 3, …` with no gaps and no duplicates.
#[async_trait]
pub trait CounterStore: Send + Sync + Debug {
    /// Increment the counter for `key` in `space` and return the new value
    async fn increment(&self, space: CounterSpace, key: &ScopeKey) -> Result<u64, CounterError>;

    /// Last value handed out for `key` in `space`, 0 if none
    async fn current(&self, space: CounterSpace, key: &ScopeKey) -> Result<u64, CounterError>;
}

#[async_trait]
impl<T: CounterStore + ?Sized> CounterStore for Arc<T> {
    async fn increment(&self, space: CounterSpace, key: &ScopeKey) -> Result<u64, CounterError> {
        (**self).increment(space, key).await
    }

    async fn current(&self, space: CounterSpace, key: &ScopeKey) -> Result<u64, CounterError> {
        (**self).current(space, key).await
    }
}

/// [`CounterStore`] over any optimistic [`DocumentStore`]
#[derive(Debug)]
pub struct TransactionalCounterStore<B> {
    backend: B,
    policy: RetryPolicy,
}

impl<B: DocumentStore> TransactionalCounterStore<B> {
    /// Create with the default retry policy
    #[inline]
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_policy(backend, RetryPolicy::default())
    }

    /// Create with an explicit retry policy
    #[inline]
    #[must_use]
    pub fn with_policy(backend: B, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    /// Underlying document store
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Retry policy in effect
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Apply `transition` to the document of `space` atomically
    ///
    /// `transition` may run several times; it must depend only on the
    /// document it is given.
    ///
    /// # Errors
    /// - [`CounterError::RetriesExhausted`] if every attempt conflicted
    /// - [`CounterError::Store`] on any other backend failure (not retried)
    pub async fn run_transaction<T, F>(
        &self,
        space: CounterSpace,
        transition: F,
    ) -> Result<T, CounterError>
    where
        F: Fn(&CounterDocument) -> (CounterDocument, T) + Send + Sync,
        T: Send,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let current = self.backend.load(space).await?.unwrap_or_default();
            let (next, output) = transition(&current);

            match self
                .backend
                .compare_and_swap(space, current.version, next)
                .await
            {
                Ok(()) => return Ok(output),
                Err(e) if e.is_conflict() => {
                    metrics::counter!("qcase_counter_conflicts_total", "space" => space.as_str())
                        .increment(1);

                    if !self.policy.allows_retry(attempt) {
                        tracing::warn!(%space, attempt, "counter transaction exhausted retries");
                        return Err(CounterError::RetriesExhausted {
                            space,
                            attempts: attempt,
                        });
                    }

                    let delay = self.policy.jittered_backoff(attempt);
                    tracing::debug!(%space, attempt, ?delay, "counter document changed, retrying");
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl<B: DocumentStore> CounterStore for TransactionalCounterStore<B> {
    async fn increment(&self, space: CounterSpace, key: &ScopeKey) -> Result<u64, CounterError> {
        let value = self
            .run_transaction(space, |doc| doc.incremented(key.as_str()))
            .await?;
        metrics::counter!("qcase_counter_increments_total", "space" => space.as_str())
            .increment(1);
        tracing::trace!(%space, %key, value, "counter incremented");
        Ok(value)
    }

    async fn current(&self, space: CounterSpace, key: &ScopeKey) -> Result<u64, CounterError> {
        Ok(self
            .backend
            .load(space)
            .await?
            .map_or(0, |doc| doc.value(key.as_str())))
    }
}
