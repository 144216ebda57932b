use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::event_sourcing::DomainEvent;
use super::value_objects::MeasurementSet;

// ============================================================================
// Customer Events - Domain Events for Customer Aggregate
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    Registered(CustomerRegistered),
    ProfileUpdated(CustomerProfileUpdated),
    MeasurementSetAdded(MeasurementSetAdded),
}

impl DomainEvent for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::Registered(_) => "CustomerRegistered",
            CustomerEvent::ProfileUpdated(_) => "CustomerProfileUpdated",
            CustomerEvent::MeasurementSetAdded(_) => "MeasurementSetAdded",
        }
    }
}

/// Customer Registered - Initial event in customer lifecycle
#[derive(Serialize, Clone, Debug)]
pub struct CustomerRegistered {
    pub customer_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub photo: Option<String>,
    pub measurement_sets: Vec<MeasurementSet>,
    pub registered_at: DateTime<Utc>,
}

/// Profile fields changed; `None` means untouched, `Some(None)` means cleared
#[derive(Serialize, Clone, Debug, Default)]
pub struct CustomerProfileUpdated {
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub photo: Option<Option<String>>,
}

#[derive(Serialize, Clone, Debug)]
pub struct MeasurementSetAdded {
    pub set: MeasurementSet,
}
