// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Value objects
// - Events
// - Commands
// - Errors
// - Aggregate implementation
//
// Fabric stock is not event-sourced; it is a plain catalog exposed to the
// order ledger through the FabricInventory trait.
//
// ============================================================================

pub mod garment;
pub mod customer;
pub mod fabric;
pub mod order;

pub use garment::GarmentType;

/// Trim an optional free-text field, dropping it when nothing is left
pub(crate) fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
