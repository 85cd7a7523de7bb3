//! Shared transaction ledger
//!
//! Every mutation republishes the full, date-ordered record list as a new
//! snapshot generation for [`LiveView`](qcase_access::LiveView) subscribers.

use crate::error::{CaseError, Result};
use parking_lot::RwLock;
use qcase_access::{SnapshotPublisher, SnapshotReceiver};
use qcase_model::{RecordId, SampleStatus, TransactionRecord};

/// In-memory record repository ordered by transaction date, newest first
#[derive(Debug)]
pub struct TransactionLedger {
    records: RwLock<Vec<TransactionRecord>>,
    publisher: SnapshotPublisher<Vec<TransactionRecord>>,
}

impl TransactionLedger {
    /// Empty ledger; publishes an empty first snapshot
    #[must_use]
    pub fn new() -> Self {
        let publisher = SnapshotPublisher::new();
        publisher.publish(Vec::new());
        Self {
            records: RwLock::new(Vec::new()),
            publisher,
        }
    }

    /// Store a record
    ///
    /// # Errors
    /// Returns [`CaseError::Duplicate`] if the record id is already taken
    pub fn insert(&self, record: TransactionRecord) -> Result<()> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(CaseError::Duplicate {
                kind: "transaction",
                id: record.id.to_string(),
            });
        }
        // Newest first; equal dates keep insertion order
        let at = records.partition_point(|r| r.transaction_date >= record.transaction_date);
        tracing::debug!(id = %record.id, number = %record.transaction_number, "transaction stored");
        records.insert(at, record);
        self.publish(&records);
        Ok(())
    }

    /// Record by id
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<TransactionRecord> {
        self.records.read().iter().find(|r| &r.id == id).cloned()
    }

    /// Record a laboratory result and mark the sample complete
    ///
    /// # Errors
    /// Returns [`CaseError::NotFound`] if the record or its sample is missing
    pub fn update_lab_result(&self, id: &RecordId, result: impl Into<String>) -> Result<()> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| CaseError::not_found("transaction", id.to_string()))?;
        let sample = record
            .sample
            .as_mut()
            .ok_or_else(|| CaseError::not_found("sample", id.to_string()))?;

        sample.lab_result = Some(result.into());
        sample.status = SampleStatus::Complete;
        tracing::debug!(%id, sample = %sample.sample_number, "lab result recorded");
        self.publish(&records);
        Ok(())
    }

    /// Public tracking lookup by customs declaration number
    #[must_use]
    pub fn find_by_customs_declaration(&self, declaration: &str) -> Option<TransactionRecord> {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            return None;
        }
        self.records
            .read()
            .iter()
            .find(|r| r.customs_declaration == declaration)
            .cloned()
    }

    /// Current records, newest first
    #[must_use]
    pub fn records(&self) -> Vec<TransactionRecord> {
        self.records.read().clone()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the ledger is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Follow ledger snapshots
    #[must_use]
    pub fn subscribe(&self) -> SnapshotReceiver<Vec<TransactionRecord>> {
        self.publisher.subscribe()
    }

    fn publish(&self, records: &[TransactionRecord]) {
        self.publisher.publish(records.to_vec());
    }
}

impl Default for TransactionLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use qcase_model::{InspectionResult, SampleInfo, Sector};

    fn tx(id: &str, day: u32) -> TransactionRecord {
        TransactionRecord {
            id: RecordId::new(id),
            transaction_number: format!("SOH-AGRI-{day:05}"),
            transaction_date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            sector: Sector::Agricultural,
            entry_point_display_value: "ميناء صحار".to_string(),
            customs_declaration: format!("CD-{id}"),
            importer_id: "imp".to_string(),
            importing_company: "Acme".to_string(),
            country_of_origin: String::new(),
            inspection_type: String::new(),
            commodities: Vec::new(),
            inspection_result: InspectionResult::Compliant,
            final_action: "release".to_string(),
            pledge: false,
            pledge_fulfilled: false,
            fees: 0.0,
            inspector: "insp".to_string(),
            notes: None,
            sample: None,
        }
    }

    fn order(ledger: &TransactionLedger) -> Vec<String> {
        ledger.records().iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn records_are_newest_first() {
        let ledger = TransactionLedger::new();
        ledger.insert(tx("a", 3)).unwrap();
        ledger.insert(tx("b", 10)).unwrap();
        ledger.insert(tx("c", 1)).unwrap();
        ledger.insert(tx("d", 10)).unwrap();

        assert_eq!(order(&ledger), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let ledger = TransactionLedger::new();
        ledger.insert(tx("a", 3)).unwrap();
        assert!(matches!(
            ledger.insert(tx("a", 4)),
            Err(CaseError::Duplicate { .. })
        ));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn lab_result_completes_sample() {
        let ledger = TransactionLedger::new();
        let mut record = tx("a", 3);
        record.sample = Some(SampleInfo {
            sample_number: "SOH-AGRI-SAMPLE-00001".to_string(),
            laboratory_name: "Central Lab".to_string(),
            sample_size: None,
            sample_date: None,
            lab_result: None,
            status: SampleStatus::Pending,
        });
        ledger.insert(record).unwrap();

        ledger.update_lab_result(&RecordId::new("a"), "negative").unwrap();

        let sample = ledger.get(&RecordId::new("a")).unwrap().sample.unwrap();
        assert_eq!(sample.lab_result.as_deref(), Some("negative"));
        assert_eq!(sample.status, SampleStatus::Complete);
    }

    #[test]
    fn lab_result_requires_a_sample() {
        let ledger = TransactionLedger::new();
        ledger.insert(tx("a", 3)).unwrap();

        let err = ledger.update_lab_result(&RecordId::new("a"), "x").unwrap_err();
        assert!(matches!(err, CaseError::NotFound { kind: "sample", .. }));

        let err = ledger.update_lab_result(&RecordId::new("zz"), "x").unwrap_err();
        assert!(matches!(err, CaseError::NotFound { kind: "transaction", .. }));
    }

    #[test]
    fn tracking_lookup_trims_input() {
        let ledger = TransactionLedger::new();
        ledger.insert(tx("a", 3)).unwrap();

        assert_eq!(
            ledger.find_by_customs_declaration("  CD-a ").map(|r| r.id),
            Some(RecordId::new("a"))
        );
        assert!(ledger.find_by_customs_declaration("   ").is_none());
        assert!(ledger.find_by_customs_declaration("CD-b").is_none());
    }

    #[test]
    fn every_mutation_publishes_a_generation() {
        let ledger = TransactionLedger::new();
        let rx = ledger.subscribe();
        assert_eq!(rx.borrow().as_ref().unwrap().generation, 1);

        ledger.insert(tx("a", 3)).unwrap();
        let snapshot = rx.borrow().clone().unwrap();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.value.len(), 1);
    }
}
