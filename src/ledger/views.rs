use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::fabric::{Fabric, FabricCatalog};
use crate::domain::order::Order;
use super::order_ledger::OrderLedger;

// ============================================================================
// Derived Views - recomputed from current state on every call
// ============================================================================

/// How many open orders the upcoming list shows
pub const UPCOMING_LIMIT: usize = 6;

/// Fabrics at or below the low-stock threshold, in catalog order
pub fn low_stock(fabrics: &FabricCatalog) -> Vec<&Fabric> {
    fabrics.low_stock()
}

/// Open orders with a due date, earliest first, capped at [`UPCOMING_LIMIT`].
///
/// Due dates are compared as strings, which orders ISO-8601 values
/// correctly. Orders sharing a due date keep their list order.
pub fn upcoming(orders: &[Order]) -> Vec<&Order> {
    let mut open: Vec<&Order> = orders
        .iter()
        .filter(|o| o.is_open())
        .filter(|o| o.due_date().is_some_and(|d| !d.is_empty()))
        .collect();

    open.sort_by(|a, b| a.due_date().cmp(&b.due_date()));
    open.truncate(UPCOMING_LIMIT);
    open
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub customer_count: usize,
    pub order_count: usize,
    /// Sum of order totals
    pub revenue: f64,
    /// Sum of amounts actually paid
    pub collected: f64,
    pub low_stock_count: usize,
}

impl DashboardSummary {
    pub fn from_ledger(ledger: &OrderLedger) -> Self {
        let orders = ledger.orders();
        Self {
            customer_count: ledger.customers().len(),
            order_count: orders.len(),
            revenue: orders.iter().map(|o| o.payment().total).sum(),
            collected: orders.iter().map(|o| o.payment().paid_amount).sum(),
            low_stock_count: ledger.fabrics().low_stock().len(),
        }
    }
}

// ----------------------------------------------------------------------------
// Search filters (case-insensitive substring, blank term matches everything)
// ----------------------------------------------------------------------------

fn matches(term: &str, field: Option<&str>) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(term))
}

fn normalized_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Orders whose code contains `term`
pub fn search_orders<'a>(orders: &'a [Order], term: &str) -> Vec<&'a Order> {
    let term = normalized_term(term);
    orders
        .iter()
        .filter(|o| matches(&term, Some(o.code().as_str())))
        .collect()
}

/// Customers whose name, phone or email contains `term`
pub fn search_customers<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    let term = normalized_term(term);
    customers
        .iter()
        .filter(|c| {
            matches(&term, Some(c.name.as_str()))
                || matches(&term, c.phone.as_deref())
                || matches(&term, c.email.as_deref())
        })
        .collect()
}

/// Fabrics whose name, category, color or pattern contains `term`
pub fn search_fabrics<'a>(fabrics: &'a FabricCatalog, term: &str) -> Vec<&'a Fabric> {
    let term = normalized_term(term);
    fabrics
        .iter()
        .filter(|f| {
            matches(&term, Some(f.name.as_str()))
                || matches(&term, Some(f.category.as_str()))
                || matches(&term, f.color.as_deref())
                || matches(&term, f.pattern.as_deref())
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use crate::domain::GarmentType;
    use crate::domain::customer::NewCustomer;
    use crate::domain::fabric::{FabricCategory, NewFabric};
    use crate::domain::order::{OrderStatus, PaymentQuote};
    use crate::ledger::NewOrder;

    fn order_due(ledger: &mut OrderLedger, due: Option<&str>) -> Uuid {
        let mut new_order = NewOrder::new(Uuid::new_v4(), vec![], PaymentQuote::default());
        new_order.due_date = due.map(str::to_string);
        ledger.create_order(new_order)
    }

    #[test]
    fn test_upcoming_filters_sorts_and_caps() {
        let mut ledger = OrderLedger::new();
        let delivered = order_due(&mut ledger, Some("2030-01-01T00:00:00.000Z"));
        ledger.update_order_status(delivered, OrderStatus::Delivered, None);
        order_due(&mut ledger, None);
        order_due(&mut ledger, Some(""));
        for day in [9, 3, 7, 1, 5, 8, 2, 6] {
            order_due(&mut ledger, Some(&format!("2030-02-0{}T00:00:00.000Z", day)));
        }

        let upcoming = ledger.upcoming();
        let dates: Vec<&str> = upcoming.iter().filter_map(|o| o.due_date()).collect();

        assert_eq!(upcoming.len(), UPCOMING_LIMIT);
        assert_eq!(dates[0], "2030-02-01T00:00:00.000Z");
        assert_eq!(dates[5], "2030-02-07T00:00:00.000Z");
        assert!(upcoming.iter().all(|o| o.id() != delivered));
    }

    #[test]
    fn test_upcoming_keeps_list_order_on_ties() {
        let mut ledger = OrderLedger::new();
        let older = order_due(&mut ledger, Some("2030-03-01"));
        let newer = order_due(&mut ledger, Some("2030-03-01"));

        let ids: Vec<Uuid> = ledger.upcoming().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![newer, older]);
    }

    #[test]
    fn test_dashboard_summary() {
        let mut ledger = OrderLedger::new();
        ledger.add_customer(NewCustomer::named("John Doe")).unwrap();
        ledger
            .add_fabric(NewFabric::new("Silk", FabricCategory::Tie, 30.0, 1.0))
            .unwrap();
        let quote = PaymentQuote {
            total: 68.0,
            ..Default::default()
        };
        let order_id = ledger.create_order(NewOrder::new(Uuid::new_v4(), vec![], quote));
        ledger.record_payment(order_id, 20.0);

        let summary = DashboardSummary::from_ledger(&ledger);
        assert_eq!(summary.customer_count, 1);
        assert_eq!(summary.order_count, 1);
        assert_eq!(summary.revenue, 68.0);
        assert_eq!(summary.collected, 20.0);
        assert_eq!(summary.low_stock_count, 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut ledger = OrderLedger::new();
        let mut customer = NewCustomer::named("John Doe");
        customer.email = Some("john@example.com".to_string());
        ledger.add_customer(customer).unwrap();
        ledger.add_customer(NewCustomer::named("Aisha")).unwrap();
        let mut fabric = NewFabric::new("Charcoal Twill", FabricCategory::Trouser, 28.0, 2.0);
        fabric.pattern = Some("Twill".to_string());
        ledger.add_fabric(fabric).unwrap();
        ledger.create_order(NewOrder::new(Uuid::new_v4(), vec![], PaymentQuote::default()));

        assert_eq!(search_customers(ledger.customers(), "  EXAMPLE ").len(), 1);
        assert_eq!(search_customers(ledger.customers(), "").len(), 2);
        assert_eq!(search_fabrics(ledger.fabrics(), "trouser").len(), 1);
        assert_eq!(search_fabrics(ledger.fabrics(), GarmentType::Coat.as_str()).len(), 0);
        assert_eq!(search_orders(ledger.orders(), "tp-00").len(), 1);
    }
}
