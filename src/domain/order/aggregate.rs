use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

use crate::event_sourcing::Aggregate;
use super::value_objects::{OrderCode, OrderItem, OrderStatus, Payment, PaymentStatus, TimelineEntry};
use super::events::*;
use super::commands::OrderCommand;
use super::errors::OrderError;

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================
//
// `status` is a copy of the last timeline entry's status. Both are written
// by the same StatusChanged application and nothing else touches them, so
// they cannot drift apart. The timeline is append-only.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: Uuid,
    code: OrderCode,
    customer_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_to: Option<String>,
    items: Vec<OrderItem>,
    status: OrderStatus,
    /// ISO-8601 string, compared as text when sorting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
    created_at: DateTime<Utc>,
    timeline: Vec<TimelineEntry>,
    payment: Payment,
}

impl Order {
    /// Build a freshly placed order: one Pending timeline entry, nothing paid
    pub fn place(e: &OrderPlaced) -> Self {
        Self {
            id: e.order_id,
            code: e.code.clone(),
            customer_id: e.customer_id,
            assigned_to: e.assigned_to.clone(),
            items: e.items.clone(),
            status: OrderStatus::Pending,
            due_date: e.due_date.clone(),
            created_at: e.placed_at,
            timeline: vec![TimelineEntry {
                at: e.placed_at,
                status: OrderStatus::Pending,
                note: None,
            }],
            payment: Payment::pending(&e.quote),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn code(&self) -> &OrderCode {
        &self.code
    }

    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    pub fn assigned_to(&self) -> Option<&str> {
        self.assigned_to.as_deref()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Current status, read from the timeline tail
    pub fn status(&self) -> OrderStatus {
        self.timeline.last().map(|entry| entry.status).unwrap_or(self.status)
    }

    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    pub fn payment(&self) -> &Payment {
        &self.payment
    }

    /// Whether the order still counts towards the upcoming list
    pub fn is_open(&self) -> bool {
        self.status() != OrderStatus::Delivered
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for Order {
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            OrderEvent::Placed(e) => Ok(Self::place(e)),
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            OrderEvent::Placed(_) => Err(OrderError::AlreadyPlaced),
            OrderEvent::StatusChanged(e) => {
                self.timeline.push(TimelineEntry {
                    at: e.at,
                    status: e.status,
                    note: e.note.clone(),
                });
                self.status = e.status;
                Ok(())
            }
            OrderEvent::PaymentRecorded(e) => {
                self.payment.paid_amount = e.paid_amount;
                self.payment.status = e.status;
                Ok(())
            }
        }
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            // Any target is accepted, including backward moves and moves
            // after delivery. Callers decide which step to offer.
            OrderCommand::UpdateStatus { status, note } => {
                Ok(vec![OrderEvent::StatusChanged(OrderStatusChanged {
                    status: *status,
                    note: note.clone(),
                    at: Utc::now(),
                })])
            }

            OrderCommand::RecordPayment { amount } => {
                let paid_amount = self.payment.paid_amount + amount;
                Ok(vec![OrderEvent::PaymentRecorded(PaymentRecorded {
                    amount: *amount,
                    paid_amount,
                    status: PaymentStatus::classify(paid_amount, self.payment.total),
                    at: Utc::now(),
                })])
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.id
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GarmentType;
    use crate::domain::order::PaymentQuote;

    fn placed_event(total: f64) -> OrderPlaced {
        OrderPlaced {
            order_id: Uuid::new_v4(),
            code: OrderCode::from_sequence(7),
            customer_id: Uuid::new_v4(),
            items: vec![OrderItem::new(GarmentType::Shirt)],
            assigned_to: Some("Sarah".to_string()),
            due_date: None,
            quote: PaymentQuote {
                total,
                fabric_cost: total - 20.0,
                sewing_cost: 20.0,
                extras: 0.0,
                discount: 0.0,
            },
            placed_at: Utc::now(),
        }
    }

    fn placed_order(total: f64) -> Order {
        Order::apply_first_event(&OrderEvent::Placed(placed_event(total))).unwrap()
    }

    #[test]
    fn test_placed_order_starts_pending() {
        let order = placed_order(68.0);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.timeline().len(), 1);
        assert_eq!(order.timeline()[0].status, OrderStatus::Pending);
        assert_eq!(order.timeline()[0].at, order.created_at());
        assert_eq!(order.payment().paid_amount, 0.0);
        assert_eq!(order.payment().status, PaymentStatus::Pending);
        assert_eq!(order.code().as_str(), "TP-0007");
    }

    #[test]
    fn test_apply_first_event_non_placed_fails() {
        let event = OrderEvent::StatusChanged(OrderStatusChanged {
            status: OrderStatus::Cutting,
            note: None,
            at: Utc::now(),
        });
        assert_eq!(Order::apply_first_event(&event).unwrap_err(), OrderError::NotInitialized);
    }

    #[test]
    fn test_placed_twice_is_rejected() {
        let mut order = placed_order(10.0);
        let result = order.apply_event(&OrderEvent::Placed(placed_event(10.0)));
        assert_eq!(result.unwrap_err(), OrderError::AlreadyPlaced);
    }

    #[test]
    fn test_status_change_appends_one_entry() {
        let mut order = placed_order(68.0);
        let events = order
            .execute(&OrderCommand::UpdateStatus {
                status: OrderStatus::Cutting,
                note: Some("Pattern prepared".to_string()),
            })
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(order.timeline().len(), 2);
        assert_eq!(order.status(), OrderStatus::Cutting);
        assert_eq!(order.timeline()[1].note.as_deref(), Some("Pattern prepared"));
    }

    #[test]
    fn test_backward_and_skipping_transitions_are_accepted() {
        let mut order = placed_order(68.0);
        for status in [OrderStatus::Ready, OrderStatus::Pending, OrderStatus::Delivered, OrderStatus::Sewing] {
            order
                .execute(&OrderCommand::UpdateStatus { status, note: None })
                .unwrap();
            assert_eq!(order.status(), status);
            assert_eq!(order.timeline().last().unwrap().status, status);
        }
        assert_eq!(order.timeline().len(), 5);
    }

    #[test]
    fn test_exact_payment_marks_paid() {
        let mut order = placed_order(68.0);
        order.execute(&OrderCommand::RecordPayment { amount: 68.0 }).unwrap();
        assert_eq!(order.payment().paid_amount, 68.0);
        assert_eq!(order.payment().status, PaymentStatus::Paid);
    }

    #[test]
    fn test_partial_then_over_payment() {
        let mut order = placed_order(68.0);
        order.execute(&OrderCommand::RecordPayment { amount: 20.0 }).unwrap();
        assert_eq!(order.payment().status, PaymentStatus::PartiallyPaid);

        order.execute(&OrderCommand::RecordPayment { amount: 60.0 }).unwrap();
        assert_eq!(order.payment().paid_amount, 80.0);
        assert_eq!(order.payment().status, PaymentStatus::Paid);
        assert_eq!(order.payment().amount_due(), 0.0);
    }

    #[test]
    fn test_payment_does_not_touch_totals() {
        let mut order = placed_order(68.0);
        let before = order.payment().clone();
        order.execute(&OrderCommand::RecordPayment { amount: 5.0 }).unwrap();

        assert_eq!(order.payment().total, before.total);
        assert_eq!(order.payment().fabric_cost, before.fabric_cost);
        assert_eq!(order.payment().sewing_cost, before.sewing_cost);
    }

    #[test]
    fn test_load_from_events_rebuilds_state() {
        let placed = placed_event(50.0);
        let order_id = placed.order_id;
        let events = vec![
            OrderEvent::Placed(placed),
            OrderEvent::StatusChanged(OrderStatusChanged {
                status: OrderStatus::Cutting,
                note: None,
                at: Utc::now(),
            }),
            OrderEvent::PaymentRecorded(PaymentRecorded {
                amount: 10.0,
                paid_amount: 10.0,
                status: PaymentStatus::PartiallyPaid,
                at: Utc::now(),
            }),
        ];

        let order = Order::load_from_events(events).unwrap();
        assert_eq!(order.aggregate_id(), order_id);
        assert_eq!(order.status(), OrderStatus::Cutting);
        assert_eq!(order.payment().status, PaymentStatus::PartiallyPaid);
    }

    #[test]
    fn test_load_from_empty_history_fails() {
        assert!(Order::load_from_events(vec![]).is_err());
    }

    #[test]
    fn test_order_wire_format() {
        let order = placed_order(68.0);
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["code"], "TP-0007");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["assignedTo"], "Sarah");
        assert_eq!(json["timeline"][0]["status"], "Pending");
        assert_eq!(json["payment"]["paidAmount"], 0.0);
        assert!(json.get("dueDate").is_none());

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
