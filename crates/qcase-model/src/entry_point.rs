//! Entry points and the key ↔ display value reference table
//!
//! Permissions name entry points by opaque key (`sohar_port`), while stored
//! records carry the human-readable display value (`ميناء صحار`). The
//! [`EntryPointReference`] is the only bridge between the two.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Opaque entry-point identifier used in permissions and scope keys
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryPointKey(String);

impl EntryPointKey {
    /// Create a key, trimming surrounding whitespace
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyEntryPoint`] if nothing is left after trimming
    pub fn new(key: impl AsRef<str>) -> Result<Self, ModelError> {
        let trimmed = key.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyEntryPoint);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Key as stored
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EntryPointKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntryPointKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntryPointKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryPointKey> for String {
    fn from(key: EntryPointKey) -> Self {
        key.0
    }
}

/// One row of the reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPointOption {
    /// Opaque key
    pub key: EntryPointKey,
    /// Display value written into records
    pub value: String,
}

impl EntryPointOption {
    /// Create a row
    ///
    /// # Errors
    /// Returns an error if the key or the display value is blank
    pub fn new(key: impl AsRef<str>, value: impl Into<String>) -> Result<Self, ModelError> {
        let key = EntryPointKey::new(key)?;
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::EmptyDisplayValue(key.0));
        }
        Ok(Self { key, value })
    }
}

/// Bidirectional entry-point table
///
/// Rows keep insertion order, which is the order dashboards list them in.
/// Both keys and display values are unique within a table, including tables
/// loaded through serde.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EntryPointOption>", into = "Vec<EntryPointOption>")]
pub struct EntryPointReference {
    options: Vec<EntryPointOption>,
}

impl EntryPointReference {
    /// Create an empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with the four entry points of the initial deployment
    #[must_use]
    pub fn with_defaults() -> Self {
        let seed = [
            ("sohar_port", "ميناء صحار"),
            ("salalah_port", "ميناء صلالة"),
            ("muscat_airport", "مطار مسقط الدولي"),
            ("al_wajajah_border", "منفذ الوجاجة البري"),
        ];
        Self {
            options: seed
                .iter()
                .map(|(key, value)| EntryPointOption {
                    key: EntryPointKey((*key).to_string()),
                    value: (*value).to_string(),
                })
                .collect(),
        }
    }

    /// Build a table from rows, rejecting duplicate keys or display values
    ///
    /// # Errors
    /// Returns the first duplicate encountered
    pub fn from_options(
        options: impl IntoIterator<Item = EntryPointOption>,
    ) -> Result<Self, ModelError> {
        let mut table = Self::new();
        for option in options {
            table.insert(option)?;
        }
        Ok(table)
    }

    /// Display value for a key
    #[must_use]
    pub fn display_value(&self, key: &EntryPointKey) -> Option<&str> {
        self.options
            .iter()
            .find(|o| &o.key == key)
            .map(|o| o.value.as_str())
    }

    /// Key for a display value
    #[must_use]
    pub fn key_for(&self, display_value: &str) -> Option<&EntryPointKey> {
        self.options
            .iter()
            .find(|o| o.value == display_value)
            .map(|o| &o.key)
    }

    /// Add a row
    ///
    /// # Errors
    /// Returns an error if the key or display value is already present
    pub fn insert(&mut self, option: EntryPointOption) -> Result<(), ModelError> {
        if option.value.trim().is_empty() {
            return Err(ModelError::EmptyDisplayValue(option.key.0));
        }
        if self.display_value(&option.key).is_some() {
            return Err(ModelError::DuplicateEntryPoint(option.key.0));
        }
        if let Some(owner) = self.key_for(&option.value) {
            return Err(ModelError::DuplicateDisplayValue {
                value: option.value,
                key: owner.0.clone(),
            });
        }
        self.options.push(option);
        Ok(())
    }

    /// Change the display value of an existing key, returning the old one
    ///
    /// Records stored under the old display value are not rewritten.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value is blank, or the
    /// value already belongs to a different key
    pub fn rename(
        &mut self,
        key: &EntryPointKey,
        value: impl Into<String>,
    ) -> Result<String, ModelError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::EmptyDisplayValue(key.0.clone()));
        }
        if let Some(owner) = self.key_for(&value) {
            if owner != key {
                return Err(ModelError::DuplicateDisplayValue {
                    value,
                    key: owner.0.clone(),
                });
            }
        }
        let option = self
            .options
            .iter_mut()
            .find(|o| &o.key == key)
            .ok_or_else(|| ModelError::UnknownEntryPoint(key.0.clone()))?;
        Ok(std::mem::replace(&mut option.value, value))
    }

    /// Remove a row, returning it
    pub fn remove(&mut self, key: &EntryPointKey) -> Option<EntryPointOption> {
        let idx = self.options.iter().position(|o| &o.key == key)?;
        Some(self.options.remove(idx))
    }

    /// Rows in table order
    #[inline]
    #[must_use]
    pub fn options(&self) -> &[EntryPointOption] {
        &self.options
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the table has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl TryFrom<Vec<EntryPointOption>> for EntryPointReference {
    type Error = ModelError;

    fn try_from(options: Vec<EntryPointOption>) -> Result<Self, Self::Error> {
        Self::from_options(options)
    }
}

impl From<EntryPointReference> for Vec<EntryPointOption> {
    fn from(reference: EntryPointReference) -> Self {
        reference.options
    }
}
