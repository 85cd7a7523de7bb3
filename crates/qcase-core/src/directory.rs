//! Entry-point directory
//!
//! Holds the live [`EntryPointReference`] and republishes it after every
//! edit. Renames and removals do not touch stored records.

use crate::error::Result;
use parking_lot::RwLock;
use qcase_access::{SnapshotPublisher, SnapshotReceiver};
use qcase_model::{EntryPointKey, EntryPointOption, EntryPointReference, ModelError};

/// Editable entry-point reference table
#[derive(Debug)]
pub struct EntryPointDirectory {
    reference: RwLock<EntryPointReference>,
    publisher: SnapshotPublisher<EntryPointReference>,
}

impl EntryPointDirectory {
    /// Directory seeded with `reference`, published as generation 1
    #[must_use]
    pub fn new(reference: EntryPointReference) -> Self {
        let publisher = SnapshotPublisher::new();
        publisher.publish(reference.clone());
        Self {
            reference: RwLock::new(reference),
            publisher,
        }
    }

    /// Copy of the current table
    #[must_use]
    pub fn current(&self) -> EntryPointReference {
        self.reference.read().clone()
    }

    /// Display value for `key`
    #[must_use]
    pub fn display_value(&self, key: &EntryPointKey) -> Option<String> {
        self.reference.read().display_value(key).map(str::to_string)
    }

    /// Add a row
    ///
    /// # Errors
    /// Returns an error if the key or display value is already present
    pub fn add(&self, option: EntryPointOption) -> Result<()> {
        self.edit(|reference| reference.insert(option))?;
        Ok(())
    }

    /// Change the display value of `key`, returning the previous value
    ///
    /// # Errors
    /// Returns an error if `key` is unknown or `value` is blank or taken
    pub fn rename(&self, key: &EntryPointKey, value: impl Into<String>) -> Result<String> {
        let value = value.into();
        let old = self.edit(|reference| reference.rename(key, value.clone()))?;
        tracing::info!(%key, old = %old, new = %value, "entry point renamed");
        Ok(old)
    }

    /// Remove the row for `key`
    pub fn remove(&self, key: &EntryPointKey) -> Option<EntryPointOption> {
        let mut reference = self.reference.write();
        let removed = reference.remove(key)?;
        self.publisher.publish(reference.clone());
        tracing::info!(%key, value = %removed.value, "entry point removed");
        Some(removed)
    }

    /// Follow reference snapshots
    #[must_use]
    pub fn subscribe(&self) -> SnapshotReceiver<EntryPointReference> {
        self.publisher.subscribe()
    }

    fn edit<T>(
        &self,
        f: impl FnOnce(&mut EntryPointReference) -> std::result::Result<T, ModelError>,
    ) -> Result<T> {
        let mut reference = self.reference.write();
        let out = f(&mut *reference)?;
        self.publisher.publish(reference.clone());
        Ok(out)
    }
}

impl Default for EntryPointDirectory {
    fn default() -> Self {
        Self::new(EntryPointReference::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaseError;

    fn key(s: &str) -> EntryPointKey {
        EntryPointKey::new(s).unwrap()
    }

    #[test]
    fn edits_publish_new_generations() {
        let directory = EntryPointDirectory::default();
        let rx = directory.subscribe();
        assert_eq!(rx.borrow().as_ref().unwrap().generation, 1);

        directory
            .add(EntryPointOption::new("duqm_port", "ميناء الدقم").unwrap())
            .unwrap();
        directory.rename(&key("duqm_port"), "ميناء الدقم الجديد").unwrap();
        directory.remove(&key("duqm_port")).unwrap();

        assert_eq!(rx.borrow().as_ref().unwrap().generation, 4);
        assert!(directory.display_value(&key("duqm_port")).is_none());
    }

    #[test]
    fn failed_edits_publish_nothing() {
        let directory = EntryPointDirectory::default();

        let err = directory
            .add(EntryPointOption::new("sohar_port", "elsewhere").unwrap())
            .unwrap_err();
        assert!(matches!(err, CaseError::Validation(_)));
        assert!(directory.remove(&key("nowhere")).is_none());

        assert_eq!(directory.subscribe().borrow().as_ref().unwrap().generation, 1);
    }

    #[test]
    fn rename_returns_previous_value() {
        let directory = EntryPointDirectory::default();
        let old = directory.rename(&key("sohar_port"), "Sohar").unwrap();

        assert_eq!(old, "ميناء صحار");
        assert_eq!(directory.display_value(&key("sohar_port")).as_deref(), Some("Sohar"));
    }
}
