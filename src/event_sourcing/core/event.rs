use serde::Serialize;

// ============================================================================
// Domain Event Trait
// ============================================================================

/// Implemented by every aggregate's event union so the command handler can
/// log and meter events without knowing the concrete aggregate.
pub trait DomainEvent: Serialize + Clone + Send + Sync {
    /// Stable event name, e.g. "OrderPlaced"
    fn event_type(&self) -> &'static str;
}
