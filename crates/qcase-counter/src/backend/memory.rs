//! Process-local document store

use super::DocumentStore;
use crate::document::CounterDocument;
use crate::error::StoreError;
use crate::space::CounterSpace;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory document store
///
/// Linearizable within one process. Values do not survive a restart; use
/// [`FileDocumentStore`](super::FileDocumentStore) for that.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<CounterSpace, CounterDocument>>,
}

impl MemoryDocumentStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current document of `space`
    #[must_use]
    pub fn snapshot(&self, space: CounterSpace) -> Option<CounterDocument> {
        self.documents.lock().get(&space).cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn load(&self, space: CounterSpace) -> Result<Option<CounterDocument>, StoreError> {
        Ok(self.snapshot(space))
    }

    async fn compare_and_swap(
        &self,
        space: CounterSpace,
        expected_version: u64,
        next: CounterDocument,
    ) -> Result<(), StoreError> {
        let mut guard = self.documents.lock();
        let found = guard.get(&space).map_or(0, |doc| doc.version);
        if found != expected_version {
            return Err(StoreError::Conflict {
                space,
                expected: expected_version,
                found,
            });
        }
        guard.insert(space, next);
        Ok(())
    }
}
