// ============================================================================
// Order Business Rule Errors
// ============================================================================
//
// Status changes and payments never fail: the ledger accepts any target
// status and any amount. Only event replay can go wrong.
//
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OrderError {
    #[error("Order has already been placed")]
    AlreadyPlaced,

    #[error("Aggregate not initialized")]
    NotInitialized,
}
