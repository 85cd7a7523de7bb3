//! Live-updating filtered views
//!
//! Repositories publish immutable [`Snapshot`]s over a `watch` channel. A
//! [`LiveView`] recomputes the visibility filter from the latest record and
//! reference snapshots, memoized on their generations.

use crate::error::AccessError;
use crate::filter::visible;
use parking_lot::Mutex;
use qcase_model::{Actor, EntryPointReference, ScopedRecord};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// One published state of a repository
#[derive(Debug)]
pub struct Snapshot<T> {
    /// Strictly increasing per publisher, starting at 1
    pub generation: u64,
    /// Published value
    pub value: Arc<T>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            value: Arc::clone(&self.value),
        }
    }
}

/// Receiving end of a snapshot channel; `None` until the first publish
pub type SnapshotReceiver<T> = watch::Receiver<Option<Snapshot<T>>>;

/// Sending end of a snapshot channel
#[derive(Debug)]
pub struct SnapshotPublisher<T> {
    tx: watch::Sender<Option<Snapshot<T>>>,
    generation: AtomicU64,
}

impl<T> SnapshotPublisher<T> {
    /// Publisher with nothing published yet
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            tx,
            generation: AtomicU64::new(0),
        }
    }

    /// Publish `value` as the next generation and return that generation
    pub fn publish(&self, value: T) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_replace(Some(Snapshot {
            generation,
            value: Arc::new(value),
        }));
        generation
    }

    /// New subscriber seeing the latest snapshot
    #[must_use]
    pub fn subscribe(&self) -> SnapshotReceiver<T> {
        self.tx.subscribe()
    }

    /// Last published generation, 0 if none
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl<T> Default for SnapshotPublisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Memo<R> {
    records_generation: u64,
    reference_generation: u64,
    view: Arc<Vec<R>>,
}

/// An actor's filtered view that follows repository updates
#[derive(Debug)]
pub struct LiveView<R> {
    actor: Actor,
    records: SnapshotReceiver<Vec<R>>,
    reference: SnapshotReceiver<EntryPointReference>,
    memo: Mutex<Option<Memo<R>>>,
    recomputations: AtomicU64,
}

impl<R: ScopedRecord + Clone> LiveView<R> {
    /// Follow `records` and `reference` on behalf of `actor`
    #[must_use]
    pub fn new(
        actor: Actor,
        records: SnapshotReceiver<Vec<R>>,
        reference: SnapshotReceiver<EntryPointReference>,
    ) -> Self {
        Self {
            actor,
            records,
            reference,
            memo: Mutex::new(None),
            recomputations: AtomicU64::new(0),
        }
    }

    /// Actor the view is filtered for
    #[inline]
    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Visible records of the latest snapshots
    ///
    /// # Errors
    /// - [`AccessError::SnapshotUnavailable`] before the first record snapshot
    /// - [`AccessError::ReferenceUnavailable`] before the first reference snapshot
    pub fn current(&self) -> Result<Arc<Vec<R>>, AccessError> {
        let records = self
            .records
            .borrow()
            .clone()
            .ok_or(AccessError::SnapshotUnavailable)?;
        let reference = self
            .reference
            .borrow()
            .clone()
            .ok_or(AccessError::ReferenceUnavailable)?;

        let mut memo = self.memo.lock();
        if let Some(m) = memo.as_ref() {
            if m.records_generation == records.generation
                && m.reference_generation == reference.generation
            {
                return Ok(Arc::clone(&m.view));
            }
        }

        let view: Arc<Vec<R>> = Arc::new(
            visible(&self.actor, &records.value, &reference.value)
                .into_iter()
                .cloned()
                .collect(),
        );
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(
            actor = %self.actor.identity,
            records = records.generation,
            reference = reference.generation,
            visible = view.len(),
            "live view recomputed"
        );
        *memo = Some(Memo {
            records_generation: records.generation,
            reference_generation: reference.generation,
            view: Arc::clone(&view),
        });
        Ok(view)
    }

    /// Wait until either snapshot changes
    ///
    /// # Errors
    /// Returns [`AccessError::Closed`] once both publishers are gone
    pub async fn changed(&mut self) -> Result<(), AccessError> {
        let records_open = tokio::select! {
            r = self.records.changed() => match r {
                Ok(()) => return Ok(()),
                Err(_) => false,
            },
            r = self.reference.changed() => match r {
                Ok(()) => return Ok(()),
                Err(_) => true,
            },
        };

        // One side closed; the other may still publish
        let remaining = if records_open {
            self.records.changed().await
        } else {
            self.reference.changed().await
        };
        remaining.map_err(|_| AccessError::Closed)
    }

    /// Number of times the filter actually ran
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }
}
