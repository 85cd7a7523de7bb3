//! QCase Core - Inspection Case Management
//!
//! Ties the shared ledger, the sequence allocator and the visibility filter
//! into one explicitly constructed system:
//! - Transaction intake with collision-free transaction and sample ids
//! - Permission-scoped record views and dashboards
//! - Confirmation-gated administrative deletions
//! - Public tracking by customs declaration
//!
//! # Example
//!
//! ```rust,ignore
//! use qcase_core::{CaseConfig, CaseSystem, TransactionDraft};
//!
//! let system = CaseSystem::from_config(CaseConfig::load("qcase.toml")?).await?;
//! let receipt = system.intake().submit(&actor, draft).await?;
//! println!("stored {}", receipt.transaction_number);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod admin;
pub mod case;
pub mod catalog;
pub mod config;
pub mod confirm;
pub mod directory;
pub mod error;
pub mod intake;
pub mod ledger;
pub mod registry;
pub mod telemetry;

pub use admin::AdminConsole;
pub use case::{CaseSystem, Dashboard};
pub use catalog::{CommodityCatalog, CommodityGroup};
pub use config::{
    AllocationConfig, CaseConfig, LoggingConfig, RetryConfig, StorageBackend, StorageConfig,
};
pub use confirm::{ConfirmationGate, PendingConfirmation};
pub use directory::EntryPointDirectory;
pub use error::{CaseError, Result};
pub use intake::{IntakeReceipt, IntakeService, SampleDraft, SharedAllocator, TransactionDraft};
pub use ledger::TransactionLedger;
pub use registry::{Importer, ImporterId, ImporterRegistry, Roster};
pub use telemetry::init_tracing;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with QCase Core
    pub use crate::{
        AdminConsole, CaseConfig, CaseError, CaseSystem, Importer, IntakeReceipt, TransactionDraft,
    };
    pub use qcase_model::{Actor, EntryPointKey, Role, Sector};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
