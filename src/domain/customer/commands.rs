use super::value_objects::{CustomerPatch, NewMeasurementSet};

// ============================================================================
// Customer Commands - Represent user intent
// ============================================================================
//
// Registration is not a command: it produces the first event through
// `Customer::register` before any aggregate exists.
//
// ============================================================================

#[derive(Debug, Clone)]
pub enum CustomerCommand {
    UpdateProfile(CustomerPatch),
    AddMeasurementSet(NewMeasurementSet),
}
