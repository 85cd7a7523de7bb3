//! QCase domain model
//!
//! Types shared by every layer of the inspection case system.
//!
//! # Core Concepts
//!
//! - [`Sector`]: One of the three regulatory domains
//! - [`EntryPointKey`]: Opaque entry-point identifier used in permissions
//! - [`EntryPointReference`]: Key ↔ display value table used to resolve permissions
//! - [`Actor`]: Authenticated user with roles and permission scopes
//! - [`TransactionRecord`]: Stored inspection transaction, optionally carrying a sample
//! - [`ScopedRecord`]: What the visibility filter needs from any record
//!
//! # Example
//!
//! ```rust,ignore
//! use qcase_model::{EntryPointKey, EntryPointReference, Sector};
//!
//! let reference = EntryPointReference::with_defaults();
//! let key = EntryPointKey::new("sohar_port")?;
//! let display = reference.display_value(&key);
//! let sector: Sector = "agricultural".parse()?;
//! ```

#![warn(unreachable_pub)]

mod actor;
mod entry_point;
mod error;
mod record;
mod sector;

pub use actor::{Actor, ActorId, Permissions, Role};
pub use entry_point::{EntryPointKey, EntryPointOption, EntryPointReference};
pub use error::ModelError;
pub use record::{
    Commodity, InspectionResult, RecordId, SampleInfo, SampleStatus, ScopedRecord,
    TransactionRecord,
};
pub use sector::Sector;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
