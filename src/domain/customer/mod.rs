// ============================================================================
// Customer Domain - Business Logic for Customer Aggregate
// ============================================================================
//
// - Value objects (MeasurementSet, NewCustomer, CustomerPatch)
// - Events (CustomerRegistered, CustomerProfileUpdated, MeasurementSetAdded)
// - Commands (UpdateProfile, AddMeasurementSet)
// - Errors (CustomerError enum)
// - Aggregate (Customer)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;

pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
