//! Permission scopes
//!
//! Permissions name entry points by key while records carry display values,
//! so a restricted scope is resolved through the [`EntryPointReference`]
//! once and then compared against records directly. A key with no row in
//! the reference table contributes nothing. A record whose stored display
//! value no longer matches the table is invisible to every restricted
//! scope, even one that permits its original entry point.

use qcase_model::{Actor, EntryPointReference, ScopedRecord, Sector};
use std::collections::BTreeSet;

/// What an actor may observe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Admins see everything
    Unrestricted,
    /// Record must match an allowed display value and an allowed sector
    Restricted {
        /// Display values resolved from the allowed entry-point keys
        display_values: BTreeSet<String>,
        /// Allowed sectors
        sectors: BTreeSet<Sector>,
    },
}

impl Scope {
    /// Resolve `actor`'s permissions against `reference`
    #[must_use]
    pub fn for_actor(actor: &Actor, reference: &EntryPointReference) -> Self {
        if actor.is_admin() {
            return Self::Unrestricted;
        }

        let allowed = &actor.permissions.allowed_entry_points;
        let display_values = allowed
            .iter()
            .filter_map(|key| {
                let value = reference.display_value(key);
                if value.is_none() {
                    tracing::debug!(actor = %actor.identity, %key, "permitted entry point missing from reference table");
                }
                value.map(str::to_string)
            })
            .collect();

        Self::Restricted {
            display_values,
            sectors: actor.permissions.allowed_sectors.clone(),
        }
    }

    /// Whether `record` falls inside this scope
    #[must_use]
    pub fn admits<R: ScopedRecord + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Restricted {
                display_values,
                sectors,
            } => {
                display_values.contains(record.entry_point_display_value())
                    && sectors.contains(&record.sector())
            }
        }
    }

    /// Whether this scope can admit anything at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unrestricted => false,
            Self::Restricted {
                display_values,
                sectors,
            } => display_values.is_empty() || sectors.is_empty(),
        }
    }
}
