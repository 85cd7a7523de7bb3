//! Transaction intake
//!
//! Validates a submitted inspection, allocates its ids and stores it in the
//! ledger. The importer is resolved before any id is allocated, so rejected
//! submissions never consume sequence numbers.

use crate::directory::EntryPointDirectory;
use crate::error::{CaseError, Result};
use crate::ledger::TransactionLedger;
use crate::registry::ImporterRegistry;
use chrono::NaiveDate;
use qcase_counter::CounterStore;
use qcase_model::{
    Actor, Commodity, EntryPointKey, InspectionResult, ModelError, RecordId, SampleInfo,
    SampleStatus, Sector, TransactionRecord,
};
use qcase_sequence::{FormattedId, SequenceAllocator, SequenceRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Allocator over a type-erased counter store
pub type SharedAllocator = Arc<SequenceAllocator<Arc<dyn CounterStore>>>;

/// Sample details entered with a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleDraft {
    /// Receiving laboratory
    pub laboratory_name: String,
    /// Free-form sample size
    #[serde(default)]
    pub sample_size: Option<String>,
    /// Date drawn
    #[serde(default)]
    pub sample_date: Option<NaiveDate>,
}

/// An inspection as entered, before ids are assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub entry_point: EntryPointKey,
    pub sector: Sector,
    pub transaction_date: NaiveDate,
    pub customs_declaration: String,
    /// Commercial registration number of the importer
    pub importer_cr_number: String,
    #[serde(default)]
    pub country_of_origin: String,
    #[serde(default)]
    pub inspection_type: String,
    #[serde(default)]
    pub commodities: Vec<Commodity>,
    pub inspection_result: InspectionResult,
    pub final_action: String,
    #[serde(default)]
    pub pledge: bool,
    #[serde(default)]
    pub pledge_fulfilled: bool,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub notes: Option<String>,
    /// Present when a sample was taken
    #[serde(default)]
    pub sample: Option<SampleDraft>,
}

impl TransactionDraft {
    /// Draft with the required fields and everything else empty
    #[must_use]
    pub fn new(
        entry_point: EntryPointKey,
        sector: Sector,
        transaction_date: NaiveDate,
        customs_declaration: impl Into<String>,
        importer_cr_number: impl Into<String>,
    ) -> Self {
        Self {
            entry_point,
            sector,
            transaction_date,
            customs_declaration: customs_declaration.into(),
            importer_cr_number: importer_cr_number.into(),
            country_of_origin: String::new(),
            inspection_type: String::new(),
            commodities: Vec::new(),
            inspection_result: InspectionResult::Compliant,
            final_action: "release".to_string(),
            pledge: false,
            pledge_fulfilled: false,
            fees: 0.0,
            notes: None,
            sample: None,
        }
    }

    /// With a sample sent to `laboratory`
    #[must_use]
    pub fn with_sample(mut self, laboratory: impl Into<String>) -> Self {
        self.sample = Some(SampleDraft {
            laboratory_name: laboratory.into(),
            sample_size: None,
            sample_date: None,
        });
        self
    }

    fn validate(&self) -> std::result::Result<(), ModelError> {
        if self.customs_declaration.trim().is_empty() {
            return Err(ModelError::MissingField("customs_declaration"));
        }
        if self.importer_cr_number.trim().is_empty() {
            return Err(ModelError::MissingField("importer_cr_number"));
        }
        if self.final_action.trim().is_empty() {
            return Err(ModelError::MissingField("final_action"));
        }
        if let Some(sample) = &self.sample {
            if sample.laboratory_name.trim().is_empty() {
                return Err(ModelError::MissingField("laboratory_name"));
            }
        }
        Ok(())
    }
}

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeReceipt {
    /// Ledger id of the stored record
    pub record_id: RecordId,
    /// Allocated transaction number
    pub transaction_number: FormattedId,
    /// Allocated sample number, when a sample was taken
    pub sample_number: Option<FormattedId>,
    /// Whether any id is a fallback `ERR-…` id
    pub degraded: bool,
}

/// Submits inspections to the ledger
#[derive(Debug, Clone)]
pub struct IntakeService {
    ledger: Arc<TransactionLedger>,
    directory: Arc<EntryPointDirectory>,
    importers: Arc<ImporterRegistry>,
    allocator: SharedAllocator,
}

impl IntakeService {
    /// Service over the given repositories
    #[must_use]
    pub fn new(
        ledger: Arc<TransactionLedger>,
        directory: Arc<EntryPointDirectory>,
        importers: Arc<ImporterRegistry>,
        allocator: SharedAllocator,
    ) -> Self {
        Self {
            ledger,
            directory,
            importers,
            allocator,
        }
    }

    /// Validate, number and store `draft` on behalf of `actor`
    ///
    /// # Errors
    /// - [`CaseError::Validation`] if a required field is blank
    /// - [`CaseError::NotFound`] if no importer has the draft's CR number
    pub async fn submit(&self, actor: &Actor, draft: TransactionDraft) -> Result<IntakeReceipt> {
        draft.validate()?;
        let importer = self
            .importers
            .find_by_cr_number(&draft.importer_cr_number)
            .ok_or_else(|| CaseError::not_found("importer", draft.importer_cr_number.trim()))?;
        let request = SequenceRequest::new(draft.entry_point.clone(), draft.sector)?;

        let sample_number = match &draft.sample {
            Some(_) => Some(self.allocator.sample_id(&request).await),
            None => None,
        };
        let transaction_number = self.allocator.transaction_id(&request).await;
        let degraded = transaction_number.is_fallback()
            || sample_number.as_ref().is_some_and(FormattedId::is_fallback);

        let entry_point_display_value = self
            .directory
            .display_value(&draft.entry_point)
            .unwrap_or_else(|| draft.entry_point.to_string());

        let sample = draft.sample.zip(sample_number.clone()).map(|(s, number)| SampleInfo {
            sample_number: number.into_inner(),
            laboratory_name: s.laboratory_name.trim().to_string(),
            sample_size: s.sample_size,
            sample_date: s.sample_date,
            lab_result: None,
            status: SampleStatus::Pending,
        });

        let record = TransactionRecord {
            id: RecordId::new(ulid::Ulid::new().to_string()),
            transaction_number: transaction_number.to_string(),
            transaction_date: draft.transaction_date,
            sector: draft.sector,
            entry_point_display_value,
            customs_declaration: draft.customs_declaration.trim().to_string(),
            importer_id: importer.id.to_string(),
            importing_company: importer.name,
            country_of_origin: draft.country_of_origin,
            inspection_type: draft.inspection_type,
            commodities: draft.commodities,
            inspection_result: draft.inspection_result,
            final_action: draft.final_action,
            pledge: draft.pledge,
            pledge_fulfilled: draft.pledge_fulfilled,
            fees: draft.fees,
            inspector: actor.name.clone(),
            notes: draft.notes,
            sample,
        };
        let record_id = record.id.clone();
        self.ledger.insert(record)?;

        metrics::counter!("qcase_intake_submissions_total", "sector" => draft.sector.as_str())
            .increment(1);
        if degraded {
            tracing::warn!(id = %record_id, number = %transaction_number, "transaction stored with fallback id");
        } else {
            tracing::info!(id = %record_id, number = %transaction_number, actor = %actor.identity, "transaction submitted");
        }

        Ok(IntakeReceipt {
            record_id,
            transaction_number,
            sample_number,
            degraded,
        })
    }
}
