use std::sync::Arc;
use anyhow::Result;
use chrono::Utc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::storage::{load_ledger, save_ledger, KeyValueStore, LoadOutcome};

use super::commands::{LedgerCommand, LedgerOutcome};
use super::order_ledger::OrderLedger;
use super::seed::demo_ledger;

// ============================================================================
// Ledger Command Handler
// ============================================================================
//
// Orchestrates: Command → OrderLedger → Document → Key-value store
//
// The whole document is written back after every command that changed
// something. There is one writer per store.
//
// ============================================================================

pub struct LedgerCommandHandler<S: KeyValueStore> {
    store: Arc<S>,
    storage_key: String,
    ledger: OrderLedger,
    metrics: Option<Arc<Metrics>>,
}

impl<S: KeyValueStore> LedgerCommandHandler<S> {
    /// Load the document, installing the demo data when it holds nothing
    pub async fn open(store: Arc<S>, config: &AppConfig) -> Result<Self> {
        Self::open_with_metrics(store, config, None).await
    }

    pub async fn open_with_metrics(
        store: Arc<S>,
        config: &AppConfig,
        metrics: Option<Arc<Metrics>>,
    ) -> Result<Self> {
        let outcome = load_ledger(store.as_ref(), &config.storage_key).await?;
        if outcome.is_corrupt() {
            if let Some(metrics) = &metrics {
                metrics.record_document_discarded();
            }
        }

        let mut ledger = outcome.into_ledger();
        let mut seeded = false;
        if ledger.is_blank() && config.seed_demo_data {
            tracing::info!(key = %config.storage_key, "Ledger is empty, installing demo data");
            ledger = demo_ledger(Utc::now())?;
            seeded = true;
        }

        let handler = Self {
            store,
            storage_key: config.storage_key.clone(),
            ledger,
            metrics,
        };

        if seeded {
            handler.persist().await?;
        }
        handler.update_low_stock_gauge();

        tracing::info!(
            key = %handler.storage_key,
            customers = handler.ledger.customers().len(),
            fabrics = handler.ledger.fabrics().len(),
            orders = handler.ledger.orders().len(),
            "Ledger opened"
        );

        Ok(handler)
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Apply a command and persist the document if it changed.
    ///
    /// The command runs against a copy of the ledger. The copy replaces the
    /// in-memory ledger only after the store accepted it, so a failed write
    /// leaves memory and store agreeing.
    pub async fn handle(&mut self, command: LedgerCommand) -> Result<LedgerOutcome> {
        let command_name = command.name();

        let mut next = self.ledger.clone();
        let outcome = next
            .apply(command)
            .map_err(|e| anyhow::anyhow!("Command {} failed: {}", command_name, e))?;

        if !outcome.is_change() {
            tracing::debug!(command = command_name, "Command changed nothing, document not written");
            return Ok(outcome);
        }

        save_ledger(self.store.as_ref(), &self.storage_key, &next)
            .await
            .map_err(|e| {
                tracing::error!(command = command_name, error = %e, "Failed to persist ledger, change discarded");
                e
            })?;
        self.ledger = next;
        self.record_metrics(&outcome);

        tracing::debug!(command = command_name, outcome = ?outcome, "Command handled");
        Ok(outcome)
    }

    async fn persist(&self) -> Result<()> {
        save_ledger(self.store.as_ref(), &self.storage_key, &self.ledger).await
    }

    fn record_metrics(&self, outcome: &LedgerOutcome) {
        let Some(metrics) = &self.metrics else {
            return;
        };

        match outcome {
            LedgerOutcome::OrderCreated(placement) => metrics.record_order_created(placement),
            LedgerOutcome::OrderStatusChanged { status, .. } => metrics.record_status_change(*status),
            LedgerOutcome::PaymentRecorded { status, .. } => metrics.record_payment(*status),
            _ => {}
        }
        self.update_low_stock_gauge();
    }

    fn update_low_stock_gauge(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.set_low_stock(self.ledger.low_stock().len());
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
