//! Sequence allocator
//!
//! Turns a [`SequenceRequest`] into one counter increment and formats the
//! returned count. [`SequenceAllocator::allocate`] never fails: when the
//! store is unavailable, exhausts its retries or misses the deadline, a
//! timestamped fallback id is issued instead.

use crate::clock::{Clock, SystemClock};
use crate::error::SequenceError;
use crate::family::IdFamily;
use crate::format::{fallback_id, format_id, FormattedId};
use crate::request::SequenceRequest;
use qcase_counter::CounterStore;
use std::sync::Arc;
use std::time::Duration;

/// A successfully numbered identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Formatted identifier
    pub id: FormattedId,
    /// Raw counter value behind `id`
    pub count: u64,
}

/// Issues transaction and sample ids backed by a [`CounterStore`]
#[derive(Debug)]
pub struct SequenceAllocator<S> {
    store: S,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl<S: CounterStore> SequenceAllocator<S> {
    /// Deadline applied to each allocation unless overridden
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Allocator on the system clock with the default timeout
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Use `clock` for fallback timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Per-allocation deadline
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Backing counter store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Deadline in effect
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Allocate the next id of `family` for `request`
    ///
    /// # Errors
    /// - [`SequenceError::Counter`] if the store failed or gave up
    /// - [`SequenceError::Timeout`] if the store did not answer in time
    pub async fn try_allocate(
        &self,
        family: IdFamily,
        request: &SequenceRequest,
    ) -> Result<Allocation, SequenceError> {
        let space = family.counter_space();
        let count = tokio::time::timeout(
            self.timeout,
            self.store.increment(space, request.scope_key()),
        )
        .await
        .map_err(|_| SequenceError::Timeout {
            timeout: self.timeout,
        })??;

        let id = format_id(
            family,
            request.entry_point().as_str(),
            request.sector().as_str(),
            count,
        );
        tracing::debug!(%family, scope = %request.scope_key(), count, %id, "sequence id allocated");
        Ok(Allocation { id, count })
    }

    /// Allocate the next id, degrading to a fallback id on failure
    pub async fn allocate(&self, family: IdFamily, request: &SequenceRequest) -> FormattedId {
        match self.try_allocate(family, request).await {
            Ok(allocation) => allocation.id,
            Err(e) => {
                let id = fallback_id(family, self.clock.unix_millis());
                metrics::counter!("qcase_sequence_fallback_total", "family" => family.as_str())
                    .increment(1);
                tracing::error!(
                    %family,
                    scope = %request.scope_key(),
                    error = %e,
                    %id,
                    "counter store unavailable, issued fallback id"
                );
                id
            }
        }
    }

    /// Next transaction id for `request`
    pub async fn transaction_id(&self, request: &SequenceRequest) -> FormattedId {
        self.allocate(IdFamily::Transaction, request).await
    }

    /// Next sample id for `request`
    pub async fn sample_id(&self, request: &SequenceRequest) -> FormattedId {
        self.allocate(IdFamily::Sample, request).await
    }
}
