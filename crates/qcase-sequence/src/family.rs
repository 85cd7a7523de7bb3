//! Identifier families

use qcase_counter::CounterSpace;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Kind of identifier being allocated
///
/// Each family numbers independently in its own counter space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFamily {
    /// Inspection transaction number
    Transaction,
    /// Laboratory sample number
    Sample,
}

impl IdFamily {
    /// Counter space the family draws from
    #[inline]
    #[must_use]
    pub const fn counter_space(self) -> CounterSpace {
        match self {
            Self::Transaction => CounterSpace::Transactions,
            Self::Sample => CounterSpace::Samples,
        }
    }

    /// Segment inserted before the count, if any
    #[inline]
    #[must_use]
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Self::Transaction => None,
            Self::Sample => Some("SAMPLE"),
        }
    }

    /// Prefix of the degraded identifier
    #[inline]
    #[must_use]
    pub const fn fallback_prefix(self) -> &'static str {
        match self {
            Self::Transaction => "ERR",
            Self::Sample => "ERR-SAMPLE",
        }
    }

    /// Metric / log label
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Sample => "sample",
        }
    }
}

impl Display for IdFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
