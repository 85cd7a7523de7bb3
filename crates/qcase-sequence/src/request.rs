//! Allocation requests

use crate::error::SequenceError;
use qcase_counter::ScopeKey;
use qcase_model::{EntryPointKey, Sector};

/// An (entry point, sector) pair naming one counting lane
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceRequest {
    entry_point: EntryPointKey,
    sector: Sector,
    scope_key: ScopeKey,
}

impl SequenceRequest {
    /// Build a request from validated parts
    ///
    /// # Errors
    /// Returns [`SequenceError::Counter`] if the derived scope key is rejected
    pub fn new(entry_point: EntryPointKey, sector: Sector) -> Result<Self, SequenceError> {
        let scope_key = ScopeKey::new(format!("{entry_point}_{sector}"))?;
        Ok(Self {
            entry_point,
            sector,
            scope_key,
        })
    }

    /// Parse raw strings as they arrive from a form
    ///
    /// # Errors
    /// Returns [`SequenceError::Validation`] for a blank entry point or an
    /// unknown sector
    pub fn parse(entry_point: &str, sector: &str) -> Result<Self, SequenceError> {
        Self::new(EntryPointKey::new(entry_point)?, sector.parse()?)
    }

    /// Entry point key
    #[inline]
    #[must_use]
    pub fn entry_point(&self) -> &EntryPointKey {
        &self.entry_point
    }

    /// Sector
    #[inline]
    #[must_use]
    pub fn sector(&self) -> Sector {
        self.sector
    }

    /// `"{entry_point}_{sector}"`
    #[inline]
    #[must_use]
    pub fn scope_key(&self) -> &ScopeKey {
        &self.scope_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scope_key_joins_key_and_sector() {
        let req = SequenceRequest::parse("sohar_port", "agricultural").unwrap();
        assert_eq!(req.scope_key().as_str(), "sohar_port_agricultural");

        let req = SequenceRequest::parse(" muscat_airport ", "food_safety").unwrap();
        assert_eq!(req.scope_key().as_str(), "muscat_airport_food_safety");
    }

    #[test]
    fn parse_rejects_bad_input_before_any_store_call() {
        let err = SequenceRequest::parse("", "agricultural").unwrap_err();
        assert!(err.is_validation());

        let err = SequenceRequest::parse("sohar_port", "fisheries").unwrap_err();
        assert!(matches!(err, SequenceError::Validation(_)));
    }

    proptest! {
        #[test]
        fn scope_key_is_prefixed_by_entry_point(key in "[a-z][a-z_]{0,20}") {
            for sector in Sector::ALL {
                let req = SequenceRequest::parse(&key, sector.as_str()).unwrap();
                let scope = req.scope_key().as_str();
                let prefix = format!("{key}_");
                prop_assert!(scope.starts_with(&prefix));
                prop_assert!(scope.ends_with(sector.as_str()));
            }
        }
    }
}
