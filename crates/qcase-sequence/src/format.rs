//! Display identifiers

use crate::abbreviation::{entry_point_code, sector_code};
use crate::family::IdFamily;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Human-readable transaction or sample identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedId(String);

impl FormattedId {
    /// Identifier text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a degraded `ERR-…` identifier
    ///
    /// Fallback identifiers carry no uniqueness or ordering guarantee.
    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.0.starts_with("ERR-")
    }

    /// Unwrap into the inner string
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for FormattedId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FormattedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<FormattedId> for String {
    fn from(id: FormattedId) -> Self {
        id.0
    }
}

/// Format a sequence number
///
/// The count is padded to at least five digits and never truncated.
#[must_use]
pub fn format_id(family: IdFamily, entry_point: &str, sector: &str, count: u64) -> FormattedId {
    let entry = entry_point_code(entry_point);
    let sector = sector_code(sector);
    let id = match family.tag() {
        Some(tag) => format!("{entry}-{sector}-{tag}-{count:05}"),
        None => format!("{entry}-{sector}-{count:05}"),
    };
    FormattedId(id)
}

/// Degraded identifier issued when the counter store cannot answer
#[must_use]
pub fn fallback_id(family: IdFamily, unix_millis: i64) -> FormattedId {
    FormattedId(format!("{}-{unix_millis}", family.fallback_prefix()))
}
