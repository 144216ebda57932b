use crate::domain::customer::CustomerError;
use crate::domain::fabric::FabricError;

// ============================================================================
// Ledger Errors
// ============================================================================
//
// Order operations have no failure path. Only customer and fabric upkeep
// can reject input.
//
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LedgerError {
    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Fabric(#[from] FabricError),
}
