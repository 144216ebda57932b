use crate::domain::customer::Customer;
use crate::domain::fabric::FabricInventory;
use crate::domain::order::Order;

// ============================================================================
// Receipt - plain-text invoice for one order
// ============================================================================

pub const RECEIPT_TITLE: &str = "Sew-In Receipt / Invoice";

/// Fixed two-decimal dollar amount, e.g. `$68.00`
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Render the receipt text. Items whose fabric is unknown show `N/A`;
/// extras and discount lines only appear when non-zero.
pub fn render_receipt(
    order: &Order,
    customer: Option<&Customer>,
    fabrics: &impl FabricInventory,
) -> String {
    let payment = order.payment();
    let mut lines = vec![
        RECEIPT_TITLE.to_string(),
        format!("Order: {}", order.code()),
        format!("Customer: {}", customer.map(|c| c.name.as_str()).unwrap_or("")),
        format!("Status: {}", order.status()),
        String::new(),
        "Items:".to_string(),
    ];

    for (index, item) in order.items().iter().enumerate() {
        let fabric_name = item
            .fabric_id
            .and_then(|id| fabrics.find_by_id(id))
            .map(|f| f.name.as_str())
            .unwrap_or("N/A");
        lines.push(format!(
            "  {}. {} - Fabric: {} - {} m",
            index + 1,
            item.garment_type,
            fabric_name,
            item.fabric_meters.unwrap_or(0.0)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Fabric: {}", format_money(payment.fabric_cost)));
    lines.push(format!("Sewing: {}", format_money(payment.sewing_cost)));
    if payment.extras != 0.0 {
        lines.push(format!("Extras: {}", format_money(payment.extras)));
    }
    if payment.discount != 0.0 {
        lines.push(format!("Discount: -{}", format_money(payment.discount)));
    }
    lines.push(format!("Total: {}", format_money(payment.total)));
    lines.push(format!(
        "Paid: {} - Status: {}",
        format_money(payment.paid_amount),
        payment.status
    ));
    lines.push(String::new());
    lines.push("Thank you!".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use crate::domain::GarmentType;
    use crate::domain::customer::NewCustomer;
    use crate::domain::fabric::{FabricCategory, NewFabric};
    use crate::domain::order::{OrderItem, PaymentQuote};
    use crate::ledger::{NewOrder, OrderLedger};

    fn ledger_with_order(discount: f64) -> (OrderLedger, Uuid, Uuid) {
        let mut ledger = OrderLedger::new();
        let customer_id = ledger.add_customer(NewCustomer::named("John Doe")).unwrap();
        let fabric_id = ledger
            .add_fabric(NewFabric::new("Oxford White", FabricCategory::Shirt, 12.0, 4.0))
            .unwrap();
        let items = vec![
            OrderItem::new(GarmentType::Shirt).with_fabric(fabric_id, 2.0),
            OrderItem::new(GarmentType::Tie).with_fabric(Uuid::new_v4(), 1.5),
        ];
        let quote = PaymentQuote {
            total: 68.0 - discount,
            fabric_cost: 24.0,
            sewing_cost: 40.0,
            extras: 4.0,
            discount,
        };
        let order_id = ledger.create_order(NewOrder::new(customer_id, items, quote));
        ledger.record_payment(order_id, 20.0);
        (ledger, customer_id, order_id)
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(68.0), "$68.00");
        assert_eq!(format_money(0.5), "$0.50");
    }

    #[test]
    fn test_receipt_lines() {
        let (ledger, customer_id, order_id) = ledger_with_order(0.0);
        let receipt = render_receipt(
            ledger.order(order_id).unwrap(),
            ledger.customer(customer_id),
            ledger.fabrics(),
        );

        assert!(receipt.starts_with(RECEIPT_TITLE));
        assert!(receipt.contains("Order: TP-0001"));
        assert!(receipt.contains("Customer: John Doe"));
        assert!(receipt.contains("1. Shirt - Fabric: Oxford White - 2 m"));
        assert!(receipt.contains("2. Tie - Fabric: N/A - 1.5 m"));
        assert!(receipt.contains("Extras: $4.00"));
        assert!(!receipt.contains("Discount"));
        assert!(receipt.contains("Total: $68.00"));
        assert!(receipt.contains("Paid: $20.00 - Status: Partially Paid"));
        assert!(receipt.ends_with("Thank you!"));
    }

    #[test]
    fn test_receipt_shows_discount_when_set() {
        let (ledger, _, order_id) = ledger_with_order(8.0);
        let receipt = render_receipt(ledger.order(order_id).unwrap(), None, ledger.fabrics());

        assert!(receipt.contains("Discount: -$8.00"));
        assert!(receipt.contains("Customer: \n"));
    }
}
