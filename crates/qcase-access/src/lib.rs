//! QCase Access Control
//!
//! Permission scopes and the visibility filter applied to the shared
//! transaction ledger.
//!
//! An actor sees a record iff they are an admin, or the record's stored
//! entry-point display value is the reference table's value for one of
//! their permitted entry-point keys **and** its sector is one of their
//! permitted sectors.
//!
//! # Core Concepts
//!
//! - [`Scope`]: An actor's permissions resolved against the reference table
//! - [`visible`]: The filter itself, order preserving
//! - [`LiveView`]: Filtered view recomputed from published [`Snapshot`]s
//! - [`LedgerStats`] / [`Breakdown`]: Dashboard figures

#![warn(unreachable_pub)]

mod error;
mod filter;
mod live;
mod scope;
mod stats;

pub use error::AccessError;
pub use filter::{laboratory_queue, orphaned, sector_view, visible};
pub use live::{LiveView, Snapshot, SnapshotPublisher, SnapshotReceiver};
pub use scope::Scope;
pub use stats::{Breakdown, LedgerStats};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
