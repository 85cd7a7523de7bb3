//! Commodity catalog
//!
//! Groups of commodity names offered on the intake form. Names are trimmed;
//! a commodity appears at most once per group.

use crate::error::{CaseError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use qcase_model::ModelError;
use serde::{Deserialize, Serialize};

/// One named group and its commodities, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityGroup {
    pub name: String,
    #[serde(default)]
    pub commodities: Vec<String>,
}

/// Commodity groups keyed by name
#[derive(Debug, Default)]
pub struct CommodityCatalog {
    groups: DashMap<String, Vec<String>>,
}

impl CommodityCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty group
    ///
    /// # Errors
    /// - [`CaseError::Validation`] if `name` is blank
    /// - [`CaseError::Duplicate`] if the group exists
    pub fn add_group(&self, name: &str) -> Result<()> {
        let name = non_blank(name, "group")?;
        match self.groups.entry(name.to_string()) {
            Entry::Occupied(_) => Err(CaseError::Duplicate {
                kind: "commodity group",
                id: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Vec::new());
                tracing::debug!(group = name, "commodity group added");
                Ok(())
            }
        }
    }

    /// Add `commodity` to `group`; returns false if it was already listed
    ///
    /// # Errors
    /// - [`CaseError::Validation`] if `commodity` is blank
    /// - [`CaseError::NotFound`] if `group` does not exist
    pub fn add_commodity(&self, group: &str, commodity: &str) -> Result<bool> {
        let commodity = non_blank(commodity, "commodity")?;
        let mut entry = self
            .groups
            .get_mut(group.trim())
            .ok_or_else(|| CaseError::not_found("commodity group", group.trim()))?;
        if entry.iter().any(|c| c == commodity) {
            return Ok(false);
        }
        entry.push(commodity.to_string());
        Ok(true)
    }

    /// Delete a group and everything in it
    pub fn remove_group(&self, name: &str) -> Option<CommodityGroup> {
        self.groups
            .remove(name.trim())
            .map(|(name, commodities)| CommodityGroup { name, commodities })
    }

    /// Delete one commodity; returns whether it was listed
    pub fn remove_commodity(&self, group: &str, commodity: &str) -> bool {
        let Some(mut entry) = self.groups.get_mut(group.trim()) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|c| c != commodity.trim());
        entry.len() != before
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<CommodityGroup> {
        self.groups.get(name.trim()).map(|e| CommodityGroup {
            name: e.key().clone(),
            commodities: e.value().clone(),
        })
    }

    /// Whether `group` lists `commodity`
    #[must_use]
    pub fn contains(&self, group: &str, commodity: &str) -> bool {
        self.groups
            .get(group.trim())
            .is_some_and(|e| e.iter().any(|c| c == commodity.trim()))
    }

    /// All groups sorted by name
    #[must_use]
    pub fn list(&self) -> Vec<CommodityGroup> {
        let mut groups: Vec<_> = self
            .groups
            .iter()
            .map(|e| CommodityGroup {
                name: e.key().clone(),
                commodities: e.value().clone(),
            })
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn non_blank<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(ModelError::MissingField(field).into())
    } else {
        Ok(value)
    }
}
