//! Counter spaces and scope keys

use crate::error::CounterError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Independent numbering domain
///
/// Each space is persisted as one document holding every scope key of that
/// space. Scope keys are never shared across spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterSpace {
    /// Transaction numbers
    Transactions,
    /// Laboratory sample numbers
    Samples,
}

impl CounterSpace {
    /// Every counter space
    pub const ALL: [CounterSpace; 2] = [CounterSpace::Transactions, CounterSpace::Samples];

    /// Document id of this space
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Samples => "samples",
        }
    }
}

impl Display for CounterSpace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One independent counting lane within a counter space
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeKey(String);

impl ScopeKey {
    /// Wrap a scope key
    ///
    /// # Errors
    /// Returns [`CounterError::InvalidScopeKey`] for blank keys
    pub fn new(key: impl Into<String>) -> Result<Self, CounterError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CounterError::InvalidScopeKey(key));
        }
        Ok(Self(key))
    }

    /// Key as stored in the counter document
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ScopeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_space_document_ids() {
        assert_eq!(CounterSpace::Transactions.as_str(), "transactions");
        assert_eq!(CounterSpace::Samples.to_string(), "samples");
    }

    #[test]
    fn scope_key_rejects_blank() {
        assert!(ScopeKey::new("").is_err());
        assert!(ScopeKey::new("  ").is_err());
        assert_eq!(
            ScopeKey::new("sohar_port_agricultural").unwrap().as_str(),
            "sohar_port_agricultural"
        );
    }
}
