//! Testing utilities for QCase workspace
//!
//! Shared fixtures and fault-injecting store wrappers.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::NaiveDate;
use qcase_counter::{CounterDocument, CounterSpace, DocumentStore, StoreError};
use qcase_model::{
    Actor, EntryPointKey, EntryPointReference, InspectionResult, RecordId, Role, SampleInfo,
    SampleStatus, Sector, TransactionRecord,
};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

/// Document store wrapper that injects conflicts, outages and latency
#[derive(Debug)]
pub struct FlakyDocumentStore<S> {
    inner: S,
    conflicts_remaining: AtomicU32,
    unavailable: AtomicBool,
    latency: Duration,
    swaps_attempted: AtomicU64,
}

impl<S: DocumentStore> FlakyDocumentStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            conflicts_remaining: AtomicU32::new(0),
            unavailable: AtomicBool::new(false),
            latency: Duration::ZERO,
            swaps_attempted: AtomicU64::new(0),
        }
    }

    /// Reject the next `n` compare-and-swaps as conflicting
    #[must_use]
    pub fn with_conflicts(self, n: u32) -> Self {
        self.conflicts_remaining.store(n, Ordering::SeqCst);
        self
    }

    /// Sleep this long before every load
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn swaps_attempted(&self) -> u64 {
        self.swaps_attempted.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("injected outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for FlakyDocumentStore<S> {
    async fn load(&self, space: CounterSpace) -> Result<Option<CounterDocument>, StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.check_available()?;
        self.inner.load(space).await
    }

    async fn compare_and_swap(
        &self,
        space: CounterSpace,
        expected_version: u64,
        next: CounterDocument,
    ) -> Result<(), StoreError> {
        self.swaps_attempted.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let injected = self
            .conflicts_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(StoreError::Conflict {
                space,
                expected: expected_version,
                found: expected_version + 1,
            });
        }
        self.inner.compare_and_swap(space, expected_version, next).await
    }
}

pub fn key(s: &str) -> EntryPointKey {
    EntryPointKey::new(s).unwrap()
}

pub fn reference() -> EntryPointReference {
    EntryPointReference::with_defaults()
}

pub fn admin() -> Actor {
    Actor::new("admin-1", "Administrator").with_role(Role::Admin)
}

/// Non-admin actor scoped to the given entry points and sectors
pub fn inspector(entry_points: &[&str], sectors: &[Sector]) -> Actor {
    let mut actor = Actor::new("insp-1", "Inspector").with_role(Role::Inspector);
    for ep in entry_points {
        actor = actor.with_entry_point(key(ep));
    }
    for sector in sectors {
        actor = actor.with_sector(*sector);
    }
    actor
}

/// Minimal record stored under `display_value` in `sector`
pub fn record(id: &str, sector: Sector, display_value: &str) -> TransactionRecord {
    TransactionRecord {
        id: RecordId::new(id),
        transaction_number: format!("TX-{id}"),
        transaction_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        sector,
        entry_point_display_value: display_value.to_string(),
        customs_declaration: format!("CD-{id}"),
        importer_id: "imp-1".to_string(),
        importing_company: "Acme Trading".to_string(),
        country_of_origin: String::new(),
        inspection_type: String::new(),
        commodities: Vec::new(),
        inspection_result: InspectionResult::Compliant,
        final_action: "release".to_string(),
        pledge: false,
        pledge_fulfilled: false,
        fees: 0.0,
        inspector: "Inspector".to_string(),
        notes: None,
        sample: None,
    }
}

/// Attach a pending sample handled by `laboratory`
pub fn with_sample(mut record: TransactionRecord, laboratory: &str) -> TransactionRecord {
    record.sample = Some(SampleInfo {
        sample_number: format!("SAMPLE-{}", record.id),
        laboratory_name: laboratory.to_string(),
        sample_size: None,
        sample_date: None,
        lab_result: None,
        status: SampleStatus::Pending,
    });
    record
}
