//! Stored inspection records

use crate::sector::Sector;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// What the visibility filter reads from a record
///
/// Records carry the entry point's display value, not its key.
pub trait ScopedRecord {
    /// Sector the record belongs to
    fn sector(&self) -> Sector;

    /// Entry-point display value captured when the record was stored
    fn entry_point_display_value(&self) -> &str;
}

/// Store-assigned record identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Wrap a store identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of the physical inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionResult {
    /// Consignment meets requirements
    Compliant,
    /// Consignment violates requirements
    NonCompliant,
}

/// Laboratory progress of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleStatus {
    /// Awaiting a laboratory result
    #[default]
    Pending,
    /// Result recorded
    Complete,
}

/// One line of a consignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commodity {
    /// Commodity group
    pub commodity_group: String,
    /// Commodity name
    pub commodity: String,
    /// Declared weight in kilograms
    pub weight: f64,
    /// Number of packages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_count: Option<u32>,
    /// Package type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
}

/// Laboratory sample drawn during an inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleInfo {
    /// Allocated sample id, e.g. `SOH-AGRI-SAMPLE-00001`
    pub sample_number: String,
    /// Laboratory the sample was sent to
    pub laboratory_name: String,
    /// Free-form sample size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<String>,
    /// Date the sample was drawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_date: Option<NaiveDate>,
    /// Laboratory result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_result: Option<String>,
    /// Progress
    #[serde(default)]
    pub status: SampleStatus,
}

/// Inspection transaction as stored in the shared ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Store id
    pub id: RecordId,
    /// Allocated transaction id, e.g. `SOH-AGRI-00007`
    pub transaction_number: String,
    /// Date of the transaction
    pub transaction_date: NaiveDate,
    /// Regulatory sector
    pub sector: Sector,
    /// Entry-point display value at the time of storage
    #[serde(rename = "portOfEntry")]
    pub entry_point_display_value: String,
    /// Customs declaration number
    pub customs_declaration: String,
    /// Importer store id
    pub importer_id: String,
    /// Importer name at the time of storage
    pub importing_company: String,
    /// Country of origin
    #[serde(default)]
    pub country_of_origin: String,
    /// Inspection type
    #[serde(default)]
    pub inspection_type: String,
    /// Consignment lines
    #[serde(default)]
    pub commodities: Vec<Commodity>,
    /// Inspection outcome
    pub inspection_result: InspectionResult,
    /// Final action key (`release`, `reject`, `destroy`, `re-export`)
    pub final_action: String,
    /// Whether the importer signed a pledge
    #[serde(default)]
    pub pledge: bool,
    /// Whether the pledge was fulfilled
    #[serde(default)]
    pub pledge_fulfilled: bool,
    /// Fees charged
    #[serde(default)]
    pub fees: f64,
    /// Inspector name
    pub inspector: String,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Sample drawn, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<SampleInfo>,
}

impl TransactionRecord {
    /// Final action removed the consignment from the market
    #[inline]
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self.final_action.as_str(), "reject" | "destroy")
    }

    /// Pledge signed but not yet fulfilled
    #[inline]
    #[must_use]
    pub fn has_open_pledge(&self) -> bool {
        self.pledge && !self.pledge_fulfilled
    }

    /// Inspection found a violation
    #[inline]
    #[must_use]
    pub fn is_non_compliant(&self) -> bool {
        self.inspection_result == InspectionResult::NonCompliant
    }

    /// Sum of declared commodity weights
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.commodities.iter().map(|c| c.weight).sum()
    }

    /// Laboratory handling this record's sample
    #[inline]
    #[must_use]
    pub fn laboratory_name(&self) -> Option<&str> {
        self.sample.as_ref().map(|s| s.laboratory_name.as_str())
    }
}

impl ScopedRecord for TransactionRecord {
    fn sector(&self) -> Sector {
        self.sector
    }

    fn entry_point_display_value(&self) -> &str {
        &self.entry_point_display_value
    }
}
