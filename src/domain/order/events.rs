use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::event_sourcing::DomainEvent;
use super::value_objects::{OrderCode, OrderItem, OrderStatus, PaymentQuote, PaymentStatus};

// ============================================================================
// Order Events - Domain Events for Order Aggregate
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    StatusChanged(OrderStatusChanged),
    PaymentRecorded(PaymentRecorded),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => "OrderPlaced",
            OrderEvent::StatusChanged(_) => "OrderStatusChanged",
            OrderEvent::PaymentRecorded(_) => "PaymentRecorded",
        }
    }
}

/// Order Placed - Initial event in order lifecycle
#[derive(Serialize, Clone, Debug)]
pub struct OrderPlaced {
    pub order_id: Uuid,
    pub code: OrderCode,
    pub customer_id: Uuid,
    pub items: Vec<OrderItem>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    pub quote: PaymentQuote,
    pub placed_at: DateTime<Utc>,
}

#[derive(Serialize, Clone, Debug)]
pub struct OrderStatusChanged {
    pub status: OrderStatus,
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

/// Carries the resulting balance so replay never recomputes it
#[derive(Serialize, Clone, Debug)]
pub struct PaymentRecorded {
    pub amount: f64,
    pub paid_amount: f64,
    pub status: PaymentStatus,
    pub at: DateTime<Utc>,
}
