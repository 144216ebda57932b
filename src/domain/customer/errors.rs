// ============================================================================
// Customer Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CustomerError {
    #[error("Customer name cannot be empty")]
    EmptyName,

    #[error("Measurement set name cannot be empty")]
    EmptyMeasurementSetName,

    #[error("Aggregate not initialized")]
    NotInitialized,
}
