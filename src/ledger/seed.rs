use std::collections::BTreeMap;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::GarmentType;
use crate::domain::customer::{Customer, CustomerEvent, CustomerRegistered, MeasurementSet};
use crate::domain::fabric::{Fabric, FabricCatalog, FabricCategory};
use crate::domain::order::{
    format_due_date, Order, OrderCode, OrderEvent, OrderItem, OrderPlaced, OrderStatus, OrderStatusChanged,
    PaymentQuote, PaymentRecorded, PaymentStatus,
};
use crate::event_sourcing::Aggregate;
use super::order_ledger::OrderLedger;

// ============================================================================
// Demo Seed - installed when a loaded document has no data at all
// ============================================================================
//
// One customer with two measurement sets, three fabrics, and order TP-0001
// already in Cutting and partially paid. Seeding does not deduct stock.
//
// ============================================================================

pub fn demo_ledger(now: DateTime<Utc>) -> anyhow::Result<OrderLedger> {
    let office_suit = measurement_set(
        "Office Suit",
        GarmentType::Coat,
        &[("chest", 100.0), ("length", 75.0), ("arm", 64.0)],
        now,
    );
    let casual_shirt = measurement_set(
        "Casual Shirt",
        GarmentType::Shirt,
        &[("chest", 98.0), ("sleeve", 62.0), ("neck", 39.0), ("shoulder", 46.0)],
        now,
    );
    let casual_shirt_id = casual_shirt.id;

    let customer = Customer::load_from_events(vec![CustomerEvent::Registered(CustomerRegistered {
        customer_id: Uuid::new_v4(),
        name: "John Doe".to_string(),
        phone: Some("555-1234".to_string()),
        email: Some("john@example.com".to_string()),
        address: Some("21 Market St".to_string()),
        photo: None,
        measurement_sets: vec![office_suit, casual_shirt],
        registered_at: now,
    })])?;

    let fabrics = vec![
        fabric("Navy Wool", FabricCategory::Coat, "Wool", "Navy", "Solid", "Fabric Co", 45.0, 12.0, now),
        fabric("Oxford White", FabricCategory::Shirt, "Cotton", "White", "Solid", "Cotton Mills", 12.0, 4.0, now),
        fabric("Charcoal Twill", FabricCategory::Trouser, "Wool Blend", "Charcoal", "Twill", "WeaveWorks", 28.0, 2.0, now),
    ];
    let oxford_id = fabrics[1].id;

    let due_date = format_due_date(now + Duration::days(3));
    let order = Order::load_from_events(vec![
        OrderEvent::Placed(OrderPlaced {
            order_id: Uuid::new_v4(),
            code: OrderCode::from_sequence(1),
            customer_id: customer.id,
            items: vec![OrderItem::new(GarmentType::Shirt)
                .with_measurement_set(casual_shirt_id)
                .with_fabric(oxford_id, 2.0)],
            assigned_to: Some("Sarah".to_string()),
            due_date: Some(due_date),
            quote: PaymentQuote {
                total: 68.0,
                fabric_cost: 24.0,
                sewing_cost: 20.0,
                extras: 4.0,
                discount: 0.0,
            },
            placed_at: now,
        }),
        OrderEvent::StatusChanged(OrderStatusChanged {
            status: OrderStatus::Cutting,
            note: Some("Pattern prepared".to_string()),
            at: now,
        }),
        OrderEvent::PaymentRecorded(PaymentRecorded {
            amount: 20.0,
            paid_amount: 20.0,
            status: PaymentStatus::PartiallyPaid,
            at: now,
        }),
    ])?;

    Ok(OrderLedger::from_parts(
        vec![customer],
        FabricCatalog::from(fabrics),
        vec![order],
        2,
    ))
}

fn measurement_set(
    name: &str,
    garment_type: GarmentType,
    values: &[(&str, f64)],
    created_at: DateTime<Utc>,
) -> MeasurementSet {
    MeasurementSet {
        id: Uuid::new_v4(),
        name: name.to_string(),
        garment_type,
        values: values
            .iter()
            .map(|(field, value)| (field.to_string(), *value))
            .collect::<BTreeMap<_, _>>(),
        notes: None,
        reference_images: Vec::new(),
        created_at,
    }
}

#[allow(clippy::too_many_arguments)]
fn fabric(
    name: &str,
    category: FabricCategory,
    fabric_type: &str,
    color: &str,
    pattern: &str,
    supplier: &str,
    price_per_meter: f64,
    stock_meters: f64,
    created_at: DateTime<Utc>,
) -> Fabric {
    Fabric {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category,
        fabric_type: Some(fabric_type.to_string()),
        color: Some(color.to_string()),
        pattern: Some(pattern.to_string()),
        supplier: Some(supplier.to_string()),
        price_per_meter,
        stock_meters,
        texture_photo: None,
        created_at,
    }
}
