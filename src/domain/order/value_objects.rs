use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::GarmentType;
use crate::domain::fabric::FabricInventory;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Workshop stage of an order. The conventional flow is linear:
/// Pending -> Cutting -> Sewing -> Ready -> Delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Cutting,
    Sewing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub const FLOW: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Cutting,
        OrderStatus::Sewing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// The step a caller would normally offer next; `None` once delivered
    pub fn next(&self) -> Option<OrderStatus> {
        let index = Self::FLOW.iter().position(|s| s == self)?;
        Self::FLOW.get(index + 1).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Cutting => "Cutting",
            OrderStatus::Sewing => "Sewing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Paid,
}

impl PaymentStatus {
    /// Derived only from what has been paid against the total.
    /// Overpayment still counts as paid.
    pub fn classify(paid_amount: f64, total: f64) -> Self {
        if paid_amount >= total {
            PaymentStatus::Paid
        } else if paid_amount > 0.0 {
            PaymentStatus::PartiallyPaid
        } else {
            PaymentStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::PartiallyPaid => "Partially Paid",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable order number, `TP-0001`, `TP-0002`, ...
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderCode(String);

impl OrderCode {
    pub const PREFIX: &'static str = "TP-";

    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{}{:04}", Self::PREFIX, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub garment_type: GarmentType,
    /// Refers to one of the customer's measurement sets; its garment type
    /// should match this item's but that is not enforced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_set_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_measurements: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_sample_photo: Option<String>,
}

impl OrderItem {
    pub fn new(garment_type: GarmentType) -> Self {
        Self {
            id: Uuid::new_v4(),
            garment_type,
            measurement_set_id: None,
            custom_measurements: None,
            fabric_id: None,
            fabric_meters: None,
            notes: None,
            fabric_sample_photo: None,
        }
    }

    pub fn with_fabric(mut self, fabric_id: Uuid, meters: f64) -> Self {
        self.fabric_id = Some(fabric_id);
        self.fabric_meters = Some(meters);
        self
    }

    pub fn with_measurement_set(mut self, set_id: Uuid) -> Self {
        self.measurement_set_id = Some(set_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Fabric and meters this item takes off the shelf, if any
    pub fn fabric_consumption(&self) -> Option<(Uuid, f64)> {
        match (self.fabric_id, self.fabric_meters) {
            (Some(fabric_id), Some(meters)) if meters > 0.0 => Some((fabric_id, meters)),
            _ => None,
        }
    }
}

/// Due dates are stored as text and sorted as text, so every writer uses
/// the same shape: UTC, millisecond precision, `Z` suffix.
pub fn format_due_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub at: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Caller-computed price breakdown, fixed when the order is placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuote {
    pub total: f64,
    pub fabric_cost: f64,
    pub sewing_cost: f64,
    pub extras: f64,
    pub discount: f64,
}

impl PaymentQuote {
    /// Price an order the way the order form does: fabric at its per-meter
    /// price, plus sewing and extras, minus discount, never below zero.
    /// Items pointing at unknown fabrics cost nothing.
    pub fn compute(
        inventory: &impl FabricInventory,
        items: &[OrderItem],
        sewing_cost: f64,
        extras: f64,
        discount: f64,
    ) -> Self {
        let fabric_cost = items
            .iter()
            .filter_map(|item| {
                let fabric = inventory.find_by_id(item.fabric_id?)?;
                Some(fabric.price_per_meter * item.fabric_meters.unwrap_or(0.0))
            })
            .sum::<f64>();

        Self {
            total: (fabric_cost + sewing_cost + extras - discount).max(0.0),
            fabric_cost,
            sewing_cost,
            extras,
            discount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub total: f64,
    pub fabric_cost: f64,
    pub sewing_cost: f64,
    #[serde(default)]
    pub extras: f64,
    #[serde(default)]
    pub discount: f64,
    pub paid_amount: f64,
    pub status: PaymentStatus,
}

impl Payment {
    /// A freshly placed order has paid nothing and is pending
    pub fn pending(quote: &PaymentQuote) -> Self {
        Self {
            total: quote.total,
            fabric_cost: quote.fabric_cost,
            sewing_cost: quote.sewing_cost,
            extras: quote.extras,
            discount: quote.discount,
            paid_amount: 0.0,
            status: PaymentStatus::Pending,
        }
    }

    /// Outstanding balance, zero once paid or overpaid
    pub fn amount_due(&self) -> f64 {
        (self.total - self.paid_amount).max(0.0)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fabric::{FabricCatalog, FabricCategory, NewFabric};

    #[test]
    fn test_order_code_padding() {
        assert_eq!(OrderCode::from_sequence(1).as_str(), "TP-0001");
        assert_eq!(OrderCode::from_sequence(42).to_string(), "TP-0042");
        assert_eq!(OrderCode::from_sequence(12345).as_str(), "TP-12345");
    }

    #[test]
    fn test_status_flow_next() {
        assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::Cutting));
        assert_eq!(OrderStatus::Ready.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_payment_status_classification() {
        assert_eq!(PaymentStatus::classify(0.0, 50.0), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::classify(10.0, 50.0), PaymentStatus::PartiallyPaid);
        assert_eq!(PaymentStatus::classify(50.0, 50.0), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::classify(80.0, 50.0), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::classify(-5.0, 50.0), PaymentStatus::Pending);
    }

    #[test]
    fn test_payment_status_wire_names() {
        let json = serde_json::to_string(&PaymentStatus::PartiallyPaid).unwrap();
        assert_eq!(json, "\"Partially Paid\"");
        let parsed: PaymentStatus = serde_json::from_str("\"Partially Paid\"").unwrap();
        assert_eq!(parsed, PaymentStatus::PartiallyPaid);
    }

    #[test]
    fn test_fabric_consumption_requires_positive_meters() {
        let fabric_id = Uuid::new_v4();
        assert_eq!(
            OrderItem::new(GarmentType::Shirt).with_fabric(fabric_id, 2.0).fabric_consumption(),
            Some((fabric_id, 2.0))
        );
        assert_eq!(
            OrderItem::new(GarmentType::Shirt).with_fabric(fabric_id, 0.0).fabric_consumption(),
            None
        );
        assert_eq!(OrderItem::new(GarmentType::Tie).fabric_consumption(), None);
    }

    #[test]
    fn test_quote_prices_known_fabrics_only() {
        let mut catalog = FabricCatalog::new();
        let wool = catalog
            .add(NewFabric::new("Navy Wool", FabricCategory::Coat, 45.0, 12.0))
            .unwrap();
        let items = vec![
            OrderItem::new(GarmentType::Coat).with_fabric(wool, 2.0),
            OrderItem::new(GarmentType::Shirt).with_fabric(Uuid::new_v4(), 3.0),
        ];

        let quote = PaymentQuote::compute(&catalog, &items, 20.0, 5.0, 10.0);
        assert_eq!(quote.fabric_cost, 90.0);
        assert_eq!(quote.total, 105.0);
    }

    #[test]
    fn test_quote_total_never_negative() {
        let catalog = FabricCatalog::new();
        let quote = PaymentQuote::compute(&catalog, &[], 20.0, 0.0, 50.0);
        assert_eq!(quote.total, 0.0);
    }

    #[test]
    fn test_due_dates_sort_chronologically_as_text() {
        use chrono::TimeZone;

        let earlier = Utc.with_ymd_and_hms(2030, 5, 1, 9, 0, 0).unwrap();
        let later = earlier + chrono::Duration::milliseconds(1500);

        assert_eq!(format_due_date(earlier), "2030-05-01T09:00:00.000Z");
        assert_eq!(format_due_date(later), "2030-05-01T09:00:01.500Z");
        assert!(format_due_date(earlier) < format_due_date(later));
    }

    #[test]
    fn test_amount_due() {
        let mut payment = Payment::pending(&PaymentQuote {
            total: 68.0,
            ..Default::default()
        });
        assert_eq!(payment.amount_due(), 68.0);
        payment.paid_amount = 100.0;
        assert_eq!(payment.amount_due(), 0.0);
    }

    #[test]
    fn test_payment_reads_without_extras_and_discount() {
        let json = r#"{"total":44,"fabricCost":24,"sewingCost":20,"paidAmount":0,"status":"Pending"}"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.extras, 0.0);
        assert_eq!(payment.discount, 0.0);
    }
}
