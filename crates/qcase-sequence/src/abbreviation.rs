//! Fixed abbreviation tables
//!
//! Lookups never fail: anything outside the tables maps to [`UNKNOWN_CODE`]
//! so an incomplete table cannot block an allocation.

use qcase_model::Sector;

/// Code used for keys missing from a table
pub const UNKNOWN_CODE: &str = "XXX";

const ENTRY_POINTS: [(&str, &str); 4] = [
    ("sohar_port", "SOH"),
    ("salalah_port", "SAL"),
    ("muscat_airport", "MCT"),
    ("al_wajajah_border", "WAJ"),
];

const SECTORS: [(&str, &str); 3] = [
    ("agricultural", "AGRI"),
    ("veterinary", "VET"),
    ("food_safety", "FOOD"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> &'static str {
    table
        .iter()
        .find_map(|(k, code)| (*k == key).then_some(*code))
        .unwrap_or(UNKNOWN_CODE)
}

/// Short code for an entry-point key
#[must_use]
pub fn entry_point_code(key: &str) -> &'static str {
    lookup(&ENTRY_POINTS, key)
}

/// Short code for a sector string
#[must_use]
pub fn sector_code(sector: &str) -> &'static str {
    lookup(&SECTORS, sector)
}

/// Short code for a parsed sector
#[inline]
#[must_use]
pub fn code_for_sector(sector: Sector) -> &'static str {
    sector_code(sector.as_str())
}
