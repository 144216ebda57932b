use anyhow::{Context, Result};

use crate::ledger::OrderLedger;
use super::local_store::KeyValueStore;

// ============================================================================
// Ledger Document - JSON persistence
// ============================================================================
//
// A document that cannot be parsed is treated exactly like a missing one:
// the caller starts from an empty ledger. Store I/O failures are still
// returned as errors.
//
// ============================================================================

pub const DEFAULT_STORAGE_KEY: &str = "sewin:v1";

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(OrderLedger),
    Missing,
    /// The stored value was not a valid document; it has not been touched
    Corrupt { reason: String },
}

impl LoadOutcome {
    /// The loaded ledger, or an empty one for a missing or corrupt document
    pub fn into_ledger(self) -> OrderLedger {
        match self {
            LoadOutcome::Loaded(ledger) => ledger,
            LoadOutcome::Missing | LoadOutcome::Corrupt { .. } => OrderLedger::default(),
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, LoadOutcome::Corrupt { .. })
    }
}

pub async fn load_ledger<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<LoadOutcome> {
    let Some(raw) = store
        .get(key)
        .await
        .with_context(|| format!("Failed to read ledger document '{}'", key))?
    else {
        tracing::debug!(key, "No ledger document stored");
        return Ok(LoadOutcome::Missing);
    };

    match serde_json::from_str::<OrderLedger>(&raw) {
        Ok(ledger) => {
            tracing::debug!(
                key,
                customers = ledger.customers().len(),
                fabrics = ledger.fabrics().len(),
                orders = ledger.orders().len(),
                seq = ledger.next_sequence(),
                "Ledger document loaded"
            );
            Ok(LoadOutcome::Loaded(ledger))
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Ledger document is not valid JSON, starting empty");
            Ok(LoadOutcome::Corrupt {
                reason: e.to_string(),
            })
        }
    }
}

/// Serialize and store the whole document
pub async fn save_ledger<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    ledger: &OrderLedger,
) -> Result<()> {
    let json = serde_json::to_string(ledger).context("Failed to serialize ledger document")?;
    store
        .set(key, &json)
        .await
        .with_context(|| format!("Failed to write ledger document '{}'", key))
}
