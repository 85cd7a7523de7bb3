//! User roster and importer registry

use crate::error::{CaseError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use qcase_model::{Actor, ActorId, ModelError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Registered users keyed by identity
#[derive(Debug, Default)]
pub struct Roster {
    users: DashMap<ActorId, Actor>,
}

impl Roster {
    /// Empty roster
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user
    pub fn insert(&self, actor: Actor) -> Option<Actor> {
        self.users.insert(actor.identity.clone(), actor)
    }

    /// User by identity
    #[must_use]
    pub fn get(&self, id: &ActorId) -> Option<Actor> {
        self.users.get(id).map(|entry| entry.value().clone())
    }

    /// Remove a user
    pub fn remove(&self, id: &ActorId) -> Option<Actor> {
        self.users.remove(id).map(|(_, actor)| actor)
    }

    /// Whether `id` is registered
    #[must_use]
    pub fn contains(&self, id: &ActorId) -> bool {
        self.users.contains_key(id)
    }

    /// All users sorted by name
    #[must_use]
    pub fn list(&self) -> Vec<Actor> {
        let mut users: Vec<_> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        users
    }

    /// Number of users
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the roster is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Store-assigned importer identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImporterId(pub String);

impl ImporterId {
    /// Fresh time-ordered id
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }
}

impl Display for ImporterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Importing company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Importer {
    /// Store id
    pub id: ImporterId,
    /// Commercial registration number
    pub cr_number: String,
    /// Company name
    pub name: String,
    /// Contact phone
    #[serde(default)]
    pub phone: String,
    /// Contact e-mail
    #[serde(default)]
    pub email: String,
    /// Postal address
    #[serde(default)]
    pub address: String,
    /// Registered line of business
    #[serde(default)]
    pub activity_type: String,
}

impl Importer {
    /// Importer with a fresh id and no contact details
    #[must_use]
    pub fn new(cr_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ImporterId::generate(),
            cr_number: cr_number.into(),
            name: name.into(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            activity_type: String::new(),
        }
    }
}

/// Importers, unique by commercial registration number
#[derive(Debug, Default)]
pub struct ImporterRegistry {
    importers: DashMap<ImporterId, Importer>,
    by_cr_number: DashMap<String, ImporterId>,
}

impl ImporterRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an importer
    ///
    /// The CR number and name are trimmed before storage.
    ///
    /// # Errors
    /// - [`CaseError::Validation`] if the CR number or name is blank
    /// - [`CaseError::Duplicate`] if the CR number is already registered
    pub fn insert(&self, mut importer: Importer) -> Result<ImporterId> {
        importer.cr_number = importer.cr_number.trim().to_string();
        importer.name = importer.name.trim().to_string();
        if importer.cr_number.is_empty() {
            return Err(ModelError::MissingField("cr_number").into());
        }
        if importer.name.is_empty() {
            return Err(ModelError::MissingField("name").into());
        }
        let id = importer.id.clone();
        match self.by_cr_number.entry(importer.cr_number.clone()) {
            Entry::Occupied(_) => Err(CaseError::Duplicate {
                kind: "importer",
                id: importer.cr_number,
            }),
            Entry::Vacant(slot) => {
                slot.insert(id.clone());
                tracing::debug!(%id, cr = %importer.cr_number, "importer registered");
                self.importers.insert(id.clone(), importer);
                Ok(id)
            }
        }
    }

    /// Importer by id
    #[must_use]
    pub fn get(&self, id: &ImporterId) -> Option<Importer> {
        self.importers.get(id).map(|e| e.value().clone())
    }

    /// Importer by commercial registration number
    #[must_use]
    pub fn find_by_cr_number(&self, cr_number: &str) -> Option<Importer> {
        let id = self.by_cr_number.get(cr_number.trim())?.value().clone();
        self.get(&id)
    }

    /// Remove an importer
    pub fn remove(&self, id: &ImporterId) -> Option<Importer> {
        let (_, importer) = self.importers.remove(id)?;
        self.by_cr_number.remove(&importer.cr_number);
        Some(importer)
    }

    /// All importers sorted by name
    #[must_use]
    pub fn list(&self) -> Vec<Importer> {
        let mut importers: Vec<_> = self.importers.iter().map(|e| e.value().clone()).collect();
        importers.sort_by(|a, b| a.name.cmp(&b.name));
        importers
    }

    /// Number of importers
    #[must_use]
    pub fn len(&self) -> usize {
        self.importers.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.importers.is_empty()
    }
}
