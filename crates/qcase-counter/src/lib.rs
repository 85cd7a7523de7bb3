//! QCase Counter Store
//!
//! Durable, linearizable per-scope counters backing the sequence allocator.
//!
//! # Core Concepts
//!
//! - [`CounterSpace`]: Independent numbering domain (transactions, samples)
//! - [`ScopeKey`]: One counting lane within a space
//! - [`CounterDocument`]: Versioned state of one space
//! - [`DocumentStore`]: Backend trait offering compare-and-swap on documents
//! - [`TransactionalCounterStore`]: Read-modify-write increments with bounded retry
//!
//! # Example
//!
//! ```rust,ignore
//! use qcase_counter::{CounterSpace, CounterStore, MemoryDocumentStore, ScopeKey, TransactionalCounterStore};
//!
//! let store = TransactionalCounterStore::new(MemoryDocumentStore::new());
//! let key = ScopeKey::new("sohar_port_agricultural")?;
//! let n = store.increment(CounterSpace::Transactions, &key).await?;
//! assert_eq!(n, 1);
//! ```

#![warn(unreachable_pub)]

mod backend;
mod document;
mod error;
mod retry;
mod space;
mod store;

pub use backend::{DocumentStore, FileDocumentStore, MemoryDocumentStore};
pub use document::CounterDocument;
pub use error::{CounterError, StoreError};
pub use retry::RetryPolicy;
pub use space::{CounterSpace, ScopeKey};
pub use store::{CounterStore, TransactionalCounterStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
