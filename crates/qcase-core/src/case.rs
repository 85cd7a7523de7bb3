//! Composition root
//!
//! [`CaseSystem`] builds every repository and service from a
//! [`CaseConfig`]. Nothing is global: each system owns its own ledger,
//! directory and counter store.

use crate::admin::AdminConsole;
use crate::catalog::CommodityCatalog;
use crate::config::{CaseConfig, StorageBackend};
use crate::confirm::ConfirmationGate;
use crate::directory::EntryPointDirectory;
use crate::error::Result;
use crate::intake::{IntakeService, SharedAllocator};
use crate::ledger::TransactionLedger;
use crate::registry::{ImporterRegistry, Roster};
use qcase_access::{laboratory_queue, visible, Breakdown, LedgerStats, LiveView};
use qcase_counter::{CounterStore, FileDocumentStore, MemoryDocumentStore, TransactionalCounterStore};
use qcase_model::{Actor, EntryPointReference, TransactionRecord};
use qcase_sequence::SequenceAllocator;
use serde::Serialize;
use std::sync::Arc;

/// Dashboard figures for one actor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Figures over the actor's visible records
    pub stats: LedgerStats,
    /// Per entry point and sector, admins only
    pub breakdown: Option<Breakdown>,
}

/// The assembled case-management system
#[derive(Debug)]
pub struct CaseSystem {
    config: CaseConfig,
    ledger: Arc<TransactionLedger>,
    directory: Arc<EntryPointDirectory>,
    importers: Arc<ImporterRegistry>,
    catalog: Arc<CommodityCatalog>,
    roster: Arc<Roster>,
    gate: Arc<ConfirmationGate>,
    allocator: SharedAllocator,
}

impl CaseSystem {
    /// Build from configuration, opening the configured counter backend
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the counter
    /// directory cannot be created
    pub async fn from_config(config: CaseConfig) -> Result<Self> {
        config.validate()?;
        let policy = config.allocation.retry.policy();
        let store: Arc<dyn CounterStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(TransactionalCounterStore::with_policy(
                MemoryDocumentStore::new(),
                policy,
            )),
            StorageBackend::File => {
                let backend = FileDocumentStore::open(&config.storage.dir).await?;
                Arc::new(TransactionalCounterStore::with_policy(backend, policy))
            }
        };
        tracing::info!(
            backend = ?config.storage.backend,
            max_attempts = policy.max_attempts,
            timeout_ms = config.allocation.timeout_ms,
            "case system starting"
        );
        Self::with_store(config, store)
    }

    /// Build over an existing counter store
    ///
    /// # Errors
    /// Returns [`CaseError::Config`](crate::CaseError::Config) if the
    /// configuration is invalid
    pub fn with_store(config: CaseConfig, store: Arc<dyn CounterStore>) -> Result<Self> {
        config.validate()?;
        let allocator =
            Arc::new(SequenceAllocator::new(store).with_timeout(config.allocation.timeout()));
        Ok(Self {
            config,
            ledger: Arc::new(TransactionLedger::new()),
            directory: Arc::new(EntryPointDirectory::new(EntryPointReference::with_defaults())),
            importers: Arc::new(ImporterRegistry::new()),
            catalog: Arc::new(CommodityCatalog::new()),
            roster: Arc::new(Roster::new()),
            gate: Arc::new(ConfirmationGate::new()),
            allocator,
        })
    }

    /// Configuration in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CaseConfig {
        &self.config
    }

    /// Shared ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &Arc<TransactionLedger> {
        &self.ledger
    }

    /// Entry-point directory
    #[inline]
    #[must_use]
    pub fn directory(&self) -> &Arc<EntryPointDirectory> {
        &self.directory
    }

    /// Importer registry
    #[inline]
    #[must_use]
    pub fn importers(&self) -> &Arc<ImporterRegistry> {
        &self.importers
    }

    /// Commodity catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Arc<CommodityCatalog> {
        &self.catalog
    }

    /// User roster
    #[inline]
    #[must_use]
    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    /// Confirmation gate shared by administrative deletions
    #[inline]
    #[must_use]
    pub fn gate(&self) -> &Arc<ConfirmationGate> {
        &self.gate
    }

    /// Sequence allocator
    #[inline]
    #[must_use]
    pub fn allocator(&self) -> &SharedAllocator {
        &self.allocator
    }

    /// Intake service
    #[must_use]
    pub fn intake(&self) -> IntakeService {
        IntakeService::new(
            Arc::clone(&self.ledger),
            Arc::clone(&self.directory),
            Arc::clone(&self.importers),
            Arc::clone(&self.allocator),
        )
    }

    /// Administrative console
    #[must_use]
    pub fn admin(&self) -> AdminConsole {
        AdminConsole::new(
            Arc::clone(&self.roster),
            Arc::clone(&self.importers),
            Arc::clone(&self.catalog),
            Arc::clone(&self.directory),
            Arc::clone(&self.ledger),
            Arc::clone(&self.gate),
        )
    }

    /// Records `actor` may observe, newest first
    #[must_use]
    pub fn visible_transactions(&self, actor: &Actor) -> Vec<TransactionRecord> {
        let records = self.ledger.records();
        visible(actor, &records, &self.directory.current())
            .into_iter()
            .cloned()
            .collect()
    }

    /// Samples awaiting or holding results at `actor`'s laboratory
    #[must_use]
    pub fn laboratory_queue(&self, actor: &Actor) -> Vec<TransactionRecord> {
        let records = self.ledger.records();
        laboratory_queue(actor, &records).into_iter().cloned().collect()
    }

    /// `actor`'s view, following ledger and directory updates
    #[must_use]
    pub fn live_view(&self, actor: Actor) -> LiveView<TransactionRecord> {
        LiveView::new(actor, self.ledger.subscribe(), self.directory.subscribe())
    }

    /// Dashboard figures for `actor`
    #[must_use]
    pub fn dashboard(&self, actor: &Actor) -> Dashboard {
        let records = self.ledger.records();
        let reference = self.directory.current();
        let stats = LedgerStats::from_records(visible(actor, &records, &reference));
        Dashboard {
            stats,
            breakdown: Breakdown::compute(actor, &records, &reference),
        }
    }

    /// Public tracking lookup
    #[must_use]
    pub fn track(&self, customs_declaration: &str) -> Option<TransactionRecord> {
        self.ledger.find_by_customs_declaration(customs_declaration)
    }
}
