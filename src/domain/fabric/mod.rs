// ============================================================================
// Fabric Domain - Inventory of cloth available for orders
// ============================================================================
//
// - Value objects (Fabric, NewFabric, FabricPatch)
// - Errors (FabricError)
// - Inventory (FabricInventory trait, FabricCatalog, stock deduction)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod inventory;

pub use value_objects::*;
pub use errors::*;
pub use inventory::*;
