//! Counter documents
//!
//! A [`CounterDocument`] is the whole persisted state of one counter space.
//! Increments are pure transitions from one document to the next; the
//! version number is what the store compares to detect concurrent writers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted state of one counter space
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDocument {
    /// Monotonic write version; 0 means the document has never been written
    pub version: u64,
    /// Scope key → last value handed out
    pub values: BTreeMap<String, u64>,
}

impl CounterDocument {
    /// Empty document at version 0
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value handed out for `key`, 0 if none
    #[inline]
    #[must_use]
    pub fn value(&self, key: &str) -> u64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    /// Next document and the value it hands out for `key`
    ///
    /// Other keys are carried over untouched.
    #[must_use]
    pub fn incremented(&self, key: &str) -> (Self, u64) {
        let next_value = self.value(key).saturating_add(1);
        let mut values = self.values.clone();
        values.insert(key.to_string(), next_value);
        (
            Self {
                version: self.version + 1,
                values,
            },
            next_value,
        )
    }
}
