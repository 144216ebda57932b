use super::value_objects::OrderStatus;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    /// Move to any status; the ledger does not police the flow
    UpdateStatus {
        status: OrderStatus,
        note: Option<String>,
    },
    /// Caller guarantees a positive amount
    RecordPayment {
        amount: f64,
    },
}
