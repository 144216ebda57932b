use uuid::Uuid;
use anyhow::Result;

// ============================================================================
// Aggregate Root Pattern
// ============================================================================
//
// 1. Commands are turned into events by `handle_command` (no mutation)
// 2. Events are the only thing that mutates state (`apply_event`)
// 3. Denormalized fields are written together inside one event application
//
// ============================================================================

/// Generic Aggregate trait - the order and customer aggregates implement this
///
/// Type Parameters:
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
pub trait Aggregate: Sized + Send + Sync {
    type Event;
    type Command;
    type Error;

    /// Create new aggregate from first event
    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error>;

    /// Apply subsequent events to update state
    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Handle command and emit events (business logic)
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Get aggregate ID
    fn aggregate_id(&self) -> Uuid;

    /// Handle a command and apply what it emits, returning the applied events
    fn execute(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle_command(command)?;
        for event in &events {
            self.apply_event(event)?;
        }
        Ok(events)
    }

    /// Rebuild an aggregate from its event history
    fn load_from_events(events: Vec<Self::Event>) -> Result<Self>
    where
        Self::Error: std::fmt::Display,
    {
        let mut events = events.into_iter();
        let first = events
            .next()
            .ok_or_else(|| anyhow::anyhow!("No events to load"))?;

        let mut aggregate = Self::apply_first_event(&first)
            .map_err(|e| anyhow::anyhow!("Failed to apply first event: {}", e))?;

        for event in events {
            aggregate.apply_event(&event)
                .map_err(|e| anyhow::anyhow!("Failed to apply event: {}", e))?;
        }

        Ok(aggregate)
    }
}
