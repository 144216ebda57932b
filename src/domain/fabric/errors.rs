// ============================================================================
// Fabric Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FabricError {
    #[error("Fabric name cannot be empty")]
    EmptyName,

    #[error("{field} cannot be negative: {value}")]
    NegativeQuantity { field: &'static str, value: f64 },
}
