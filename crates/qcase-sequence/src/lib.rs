//! QCase Sequence Allocator
//!
//! Collision-free, human-readable identifiers scoped by entry point and
//! sector.
//!
//! # Id layout
//!
//! | family      | example                 |
//! |-------------|-------------------------|
//! | transaction | `SOH-AGRI-00007`        |
//! | sample      | `SOH-AGRI-SAMPLE-00001` |
//! | fallback    | `ERR-1736900000000`, `ERR-SAMPLE-1736900000000` |
//!
//! # Example
//!
//! ```rust,ignore
//! use qcase_counter::{MemoryDocumentStore, TransactionalCounterStore};
//! use qcase_sequence::{SequenceAllocator, SequenceRequest};
//!
//! let alloc = SequenceAllocator::new(TransactionalCounterStore::new(MemoryDocumentStore::new()));
//! let req = SequenceRequest::parse("sohar_port", "agricultural")?;
//! assert_eq!(alloc.transaction_id(&req).await.as_str(), "SOH-AGRI-00001");
//! ```

#![warn(unreachable_pub)]

mod abbreviation;
mod allocator;
mod clock;
mod error;
mod family;
mod format;
mod request;

pub use abbreviation::{code_for_sector, entry_point_code, sector_code, UNKNOWN_CODE};
pub use allocator::{Allocation, SequenceAllocator};
pub use clock::{Clock, MockClock, SystemClock};
pub use error::SequenceError;
pub use family::IdFamily;
pub use format::{fallback_id, format_id, FormattedId};
pub use request::SequenceRequest;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
