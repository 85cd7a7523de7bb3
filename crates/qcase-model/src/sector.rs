//! Regulatory sectors

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Regulatory domain a transaction belongs to
///
/// The string form (`agricultural`, `veterinary`, `food_safety`) is the one
/// stored in records, permissions and counter scope keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    /// Plant quarantine
    Agricultural,
    /// Animal health
    Veterinary,
    /// Food safety control
    FoodSafety,
}

impl Sector {
    /// Every sector, in display order
    pub const ALL: [Sector; 3] = [Sector::Agricultural, Sector::Veterinary, Sector::FoodSafety];

    /// Stored string form
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agricultural => "agricultural",
            Self::Veterinary => "veterinary",
            Self::FoodSafety => "food_safety",
        }
    }
}

impl Display for Sector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "agricultural" => Ok(Self::Agricultural),
            "veterinary" => Ok(Self::Veterinary),
            "food_safety" => Ok(Self::FoodSafety),
            other => Err(ModelError::UnknownSector(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_parse_roundtrips_every_variant() {
        for sector in Sector::ALL {
            assert_eq!(sector.as_str().parse::<Sector>().unwrap(), sector);
        }
    }

    #[test]
    fn sector_rejects_unknown() {
        let err = "fisheries".parse::<Sector>().unwrap_err();
        assert_eq!(err, ModelError::UnknownSector("fisheries".to_string()));
    }

    #[test]
    fn sector_rejects_empty() {
        assert!("".parse::<Sector>().is_err());
        assert!("   ".parse::<Sector>().is_err());
    }

    #[test]
    fn sector_serde_uses_snake_case() {
        let json = serde_json::to_string(&Sector::FoodSafety).unwrap();
        assert_eq!(json, "\"food_safety\"");
    }
}
