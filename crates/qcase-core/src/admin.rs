//! Administrative maintenance
//!
//! Deletions are not applied directly: each one is parked on the
//! [`ConfirmationGate`] and runs only when the gate is confirmed.

use crate::catalog::CommodityCatalog;
use crate::confirm::ConfirmationGate;
use crate::directory::EntryPointDirectory;
use crate::error::{CaseError, Result};
use crate::ledger::TransactionLedger;
use crate::registry::{ImporterId, ImporterRegistry, Roster};
use qcase_access::orphaned;
use qcase_model::{Actor, ActorId, EntryPointKey, EntryPointOption};
use std::sync::Arc;

/// Admin-only operations over users, importers, commodities and entry points
#[derive(Debug, Clone)]
pub struct AdminConsole {
    roster: Arc<Roster>,
    importers: Arc<ImporterRegistry>,
    catalog: Arc<CommodityCatalog>,
    directory: Arc<EntryPointDirectory>,
    ledger: Arc<TransactionLedger>,
    gate: Arc<ConfirmationGate>,
}

impl AdminConsole {
    /// Console over the given repositories
    #[must_use]
    pub fn new(
        roster: Arc<Roster>,
        importers: Arc<ImporterRegistry>,
        catalog: Arc<CommodityCatalog>,
        directory: Arc<EntryPointDirectory>,
        ledger: Arc<TransactionLedger>,
        gate: Arc<ConfirmationGate>,
    ) -> Self {
        Self {
            roster,
            importers,
            catalog,
            directory,
            ledger,
            gate,
        }
    }

    /// Gate that pending deletions wait on
    #[inline]
    #[must_use]
    pub fn gate(&self) -> &Arc<ConfirmationGate> {
        &self.gate
    }

    /// Request deletion of user `target`
    ///
    /// # Errors
    /// - [`CaseError::PermissionDenied`] unless `actor` is an admin
    /// - [`CaseError::SelfDeletion`] if `target` is `actor`
    /// - [`CaseError::NotFound`] if `target` is not registered
    pub fn delete_user(&self, actor: &Actor, target: &ActorId) -> Result<()> {
        require_admin(actor, "delete users")?;
        if &actor.identity == target {
            return Err(CaseError::SelfDeletion);
        }
        let user = self
            .roster
            .get(target)
            .ok_or_else(|| CaseError::not_found("user", target.to_string()))?;

        let roster = Arc::clone(&self.roster);
        let target = target.clone();
        self.gate.request(
            "Delete user",
            format!("Delete user '{}'? This cannot be undone.", user.name),
            move || {
                if roster.remove(&target).is_some() {
                    tracing::info!(user = %target, "user deleted");
                }
            },
        );
        Ok(())
    }

    /// Request deletion of importer `id`
    ///
    /// # Errors
    /// - [`CaseError::PermissionDenied`] unless `actor` is an admin
    /// - [`CaseError::NotFound`] if `id` is not registered
    pub fn delete_importer(&self, actor: &Actor, id: &ImporterId) -> Result<()> {
        require_admin(actor, "delete importers")?;
        let importer = self
            .importers
            .get(id)
            .ok_or_else(|| CaseError::not_found("importer", id.to_string()))?;

        let importers = Arc::clone(&self.importers);
        let id = id.clone();
        self.gate.request(
            "Delete importer",
            format!(
                "Delete importer '{}' ({})?",
                importer.name, importer.cr_number
            ),
            move || {
                if importers.remove(&id).is_some() {
                    tracing::info!(importer = %id, "importer deleted");
                }
            },
        );
        Ok(())
    }

    /// Request deletion of commodity group `name` with all its commodities
    ///
    /// # Errors
    /// - [`CaseError::PermissionDenied`] unless `actor` is an admin
    /// - [`CaseError::NotFound`] if the group does not exist
    pub fn delete_commodity_group(&self, actor: &Actor, name: &str) -> Result<()> {
        require_admin(actor, "delete commodity groups")?;
        let group = self
            .catalog
            .get(name)
            .ok_or_else(|| CaseError::not_found("commodity group", name.trim()))?;

        let catalog = Arc::clone(&self.catalog);
        self.gate.request(
            "Delete group",
            format!(
                "Delete group '{}' and its {} commodities?",
                group.name,
                group.commodities.len()
            ),
            move || {
                if catalog.remove_group(&group.name).is_some() {
                    tracing::info!(group = %group.name, "commodity group deleted");
                }
            },
        );
        Ok(())
    }

    /// Request deletion of `commodity` from `group`
    ///
    /// # Errors
    /// - [`CaseError::PermissionDenied`] unless `actor` is an admin
    /// - [`CaseError::NotFound`] if the group does not list the commodity
    pub fn delete_commodity(&self, actor: &Actor, group: &str, commodity: &str) -> Result<()> {
        require_admin(actor, "delete commodities")?;
        if !self.catalog.contains(group, commodity) {
            return Err(CaseError::not_found(
                "commodity",
                format!("{}/{}", group.trim(), commodity.trim()),
            ));
        }

        let catalog = Arc::clone(&self.catalog);
        let group = group.trim().to_string();
        let commodity = commodity.trim().to_string();
        self.gate.request(
            "Delete commodity",
            format!("Delete '{commodity}' from '{group}'?"),
            move || {
                if catalog.remove_commodity(&group, &commodity) {
                    tracing::info!(%group, %commodity, "commodity deleted");
                }
            },
        );
        Ok(())
    }

    /// Create a commodity group
    ///
    /// # Errors
    /// - [`CaseError::PermissionDenied`] unless `actor` is an admin
    /// - [`CaseError::Validation`] or [`CaseError::Duplicate`] from the catalog
    pub fn add_commodity_group(&self, actor: &Actor, name: &str) -> Result<()> {
        require_admin(actor, "edit commodities")?;
        self.catalog.add_group(name)
    }

    /// Add a commodity to an existing group
    ///
    /// # Errors
    /// - [`CaseError::PermissionDenied`] unless `actor` is an admin
    /// - [`CaseError::Validation`] or [`CaseError::NotFound`] from the catalog
    pub fn add_commodity(&self, actor: &Actor, group: &str, commodity: &str) -> Result<bool> {
        require_admin(actor, "edit commodities")?;
        self.catalog.add_commodity(group, commodity)
    }

    /// Request removal of entry point `key`
    ///
    /// Records stored under its display value stay in the ledger but are no
    /// longer visible to restricted actors.
    ///
    /// # Errors
    /// - [`CaseError::PermissionDenied`] unless `actor` is an admin
    /// - [`CaseError::NotFound`] if `key` is not in the directory
    pub fn remove_entry_point(&self, actor: &Actor, key: &EntryPointKey) -> Result<()> {
        require_admin(actor, "remove entry points")?;
        let value = self
            .directory
            .display_value(key)
            .ok_or_else(|| CaseError::not_found("entry point", key.to_string()))?;

        let directory = Arc::clone(&self.directory);
        let key = key.clone();
        self.gate.request(
            "Remove entry point",
            format!("Remove entry point '{value}'?"),
            move || {
                directory.remove(&key);
            },
        );
        Ok(())
    }

    /// Add an entry point
    ///
    /// # Errors
    /// - [`CaseError::PermissionDenied`] unless `actor` is an admin
    /// - [`CaseError::Validation`] if the key or display value is taken
    pub fn add_entry_point(&self, actor: &Actor, option: EntryPointOption) -> Result<()> {
        require_admin(actor, "edit entry points")?;
        self.directory.add(option)
    }

    /// Change the display value of `key`, returning the previous one
    ///
    /// Applied immediately. Records already stored under the previous value
    /// become invisible to restricted actors; the count is logged.
    ///
    /// # Errors
    /// - [`CaseError::PermissionDenied`] unless `actor` is an admin
    /// - [`CaseError::Validation`] if `key` is unknown or `value` is invalid
    pub fn rename_entry_point(
        &self,
        actor: &Actor,
        key: &EntryPointKey,
        value: impl Into<String>,
    ) -> Result<String> {
        require_admin(actor, "edit entry points")?;
        let old = self.directory.rename(key, value)?;

        let records = self.ledger.records();
        let stranded = orphaned(&records, &self.directory.current())
            .iter()
            .filter(|r| r.entry_point_display_value == old)
            .count();
        if stranded > 0 {
            tracing::warn!(
                %key,
                old = %old,
                stranded,
                "renamed entry point; existing records keep the old display value"
            );
        }
        Ok(old)
    }

    /// Register or replace a user
    ///
    /// # Errors
    /// Returns [`CaseError::PermissionDenied`] unless `actor` is an admin
    pub fn upsert_user(&self, actor: &Actor, user: Actor) -> Result<()> {
        require_admin(actor, "manage users")?;
        tracing::info!(user = %user.identity, "user saved");
        self.roster.insert(user);
        Ok(())
    }
}

fn require_admin(actor: &Actor, action: &str) -> Result<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(CaseError::PermissionDenied(format!(
            "{} may not {action}",
            actor.identity
        )))
    }
}
