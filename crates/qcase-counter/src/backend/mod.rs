//! Document store backends
//!
//! A [`DocumentStore`] persists one [`CounterDocument`] per counter space and
//! offers a single write primitive, compare-and-swap on the document version.
//! Everything counter-specific lives above it in
//! [`TransactionalCounterStore`](crate::TransactionalCounterStore).

mod file;
mod memory;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;

use crate::document::CounterDocument;
use crate::error::StoreError;
use crate::space::CounterSpace;
use async_trait::async_trait;
use std::sync::Arc;

/// Versioned document storage with optimistic concurrency
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Current document of `space`, `None` if it was never written
    async fn load(&self, space: CounterSpace) -> Result<Option<CounterDocument>, StoreError>;

    /// Replace the document of `space` with `next` iff its version is still `expected_version`
    ///
    /// `expected_version == 0` means the document must not exist yet.
    ///
    /// # Errors
    /// [`StoreError::Conflict`] if another writer got there first
    async fn compare_and_swap(
        &self,
        space: CounterSpace,
        expected_version: u64,
        next: CounterDocument,
    ) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn load(&self, space: CounterSpace) -> Result<Option<CounterDocument>, StoreError> {
        (**self).load(space).await
    }

    async fn compare_and_swap(
        &self,
        space: CounterSpace,
        expected_version: u64,
        next: CounterDocument,
    ) -> Result<(), StoreError> {
        (**self).compare_and_swap(space, expected_version, next).await
    }
}
