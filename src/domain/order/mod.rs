// ============================================================================
// Order Domain - Business Logic for Order Aggregate
// ============================================================================
//
// - Value objects (OrderItem, OrderStatus, Payment, OrderCode)
// - Events (OrderPlaced, OrderStatusChanged, PaymentRecorded)
// - Commands (UpdateStatus, RecordPayment)
// - Errors (OrderError enum)
// - Aggregate (Order)
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
