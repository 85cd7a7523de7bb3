//! Dashboard statistics over ledger records

use crate::filter::visible;
use qcase_model::{Actor, EntryPointReference, Sector, TransactionRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate figures for a set of transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    /// Number of transactions
    pub total: usize,
    /// Sum of fees charged
    pub total_fees: f64,
    /// Consignments rejected or destroyed
    pub rejected: usize,
    /// Pledges signed and not yet fulfilled
    pub open_pledges: usize,
    /// Inspections that found a violation
    pub non_compliant: usize,
    /// Declared weight across all commodities
    pub total_weight: f64,
}

impl LedgerStats {
    /// Fold `records` into one set of figures
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, r| {
            stats.add(r);
            stats
        })
    }

    fn add(&mut self, record: &TransactionRecord) {
        self.total += 1;
        self.total_fees += record.fees;
        self.total_weight += record.total_weight();
        if record.is_rejected() {
            self.rejected += 1;
        }
        if record.has_open_pledge() {
            self.open_pledges += 1;
        }
        if record.is_non_compliant() {
            self.non_compliant += 1;
        }
    }
}

/// Administrative breakdown by entry point and sector
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    /// Figures over every record
    pub overall: LedgerStats,
    /// Keyed by the display value stored on each record
    pub by_entry_point: BTreeMap<String, LedgerStats>,
    /// Keyed by sector
    pub by_sector: BTreeMap<Sector, LedgerStats>,
}

impl Breakdown {
    /// Compute the breakdown, or `None` unless `actor` is an admin
    #[must_use]
    pub fn compute(
        actor: &Actor,
        records: &[TransactionRecord],
        reference: &EntryPointReference,
    ) -> Option<Self> {
        if !actor.is_admin() {
            return None;
        }

        let mut breakdown = Self::default();
        for record in visible(actor, records, reference) {
            breakdown.overall.add(record);
            breakdown
                .by_entry_point
                .entry(record.entry_point_display_value.clone())
                .or_default()
                .add(record);
            breakdown.by_sector.entry(record.sector).or_default().add(record);
        }
        Some(breakdown)
    }
}
