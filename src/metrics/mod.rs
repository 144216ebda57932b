use prometheus::{Counter, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

use crate::domain::order::{OrderStatus, PaymentStatus};
use crate::ledger::OrderPlacement;

// ============================================================================
// Metrics Module - Prometheus metrics for the shop ledger
// ============================================================================
//
// Provides metrics for:
// - Orders placed and workshop status changes
// - Payments by resulting payment status
// - Fabric consumption and stock clamping
// - Persisted documents discarded as corrupt
//
// All metrics live in one Registry; `gather()` exposes them to whatever
// exporter the embedding application uses.
// ============================================================================

/// Central metrics registry for the ledger
pub struct Metrics {
    registry: Registry,

    // Order Metrics
    pub orders_created: IntCounter,
    pub status_changes: IntCounterVec,
    pub payments_recorded: IntCounterVec,

    // Fabric Metrics
    pub fabric_meters_deducted: Counter,
    pub stock_clamped: IntCounter,
    pub low_stock_fabrics: IntGauge,

    // Storage Metrics
    pub documents_discarded: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Order Metrics
        let orders_created = IntCounter::new(
            "sewin_orders_created_total",
            "Total orders placed",
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let status_changes = IntCounterVec::new(
            Opts::new("sewin_order_status_changes_total", "Order status changes by target status"),
            &["status"],
        )?;
        registry.register(Box::new(status_changes.clone()))?;

        let payments_recorded = IntCounterVec::new(
            Opts::new("sewin_payments_recorded_total", "Payments recorded by resulting payment status"),
            &["payment_status"],
        )?;
        registry.register(Box::new(payments_recorded.clone()))?;

        // Fabric Metrics
        let fabric_meters_deducted = Counter::new(
            "sewin_fabric_meters_deducted_total",
            "Meters of fabric taken off the shelf by orders",
        )?;
        registry.register(Box::new(fabric_meters_deducted.clone()))?;

        let stock_clamped = IntCounter::new(
            "sewin_fabric_stock_clamped_total",
            "Deductions that asked for more fabric than was in stock",
        )?;
        registry.register(Box::new(stock_clamped.clone()))?;

        let low_stock_fabrics = IntGauge::new(
            "sewin_low_stock_fabrics",
            "Fabrics at or below the low-stock threshold",
        )?;
        registry.register(Box::new(low_stock_fabrics.clone()))?;

        // Storage Metrics
        let documents_discarded = IntCounter::new(
            "sewin_documents_discarded_total",
            "Persisted documents that failed to parse and were replaced",
        )?;
        registry.register(Box::new(documents_discarded.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            status_changes,
            payments_recorded,
            fabric_meters_deducted,
            stock_clamped,
            low_stock_fabrics,
            documents_discarded,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Count the order and what its items took off the shelf
    pub fn record_order_created(&self, placement: &OrderPlacement) {
        self.orders_created.inc();
        for deduction in &placement.deductions {
            self.fabric_meters_deducted.inc_by(deduction.applied);
            if deduction.was_clamped() {
                self.stock_clamped.inc();
            }
        }
    }

    pub fn record_status_change(&self, status: OrderStatus) {
        self.status_changes.with_label_values(&[status.as_str()]).inc();
    }

    pub fn record_payment(&self, status: PaymentStatus) {
        self.payments_recorded.with_label_values(&[status.as_str()]).inc();
    }

    pub fn set_low_stock(&self, count: usize) {
        self.low_stock_fabrics.set(count as i64);
    }

    pub fn record_document_discarded(&self) {
        self.documents_discarded.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use crate::domain::fabric::StockDeduction;
    use crate::domain::order::OrderCode;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(!metrics.registry.gather().is_empty());
    }

    #[test]
    fn test_record_order_created() {
        let metrics = Metrics::new().unwrap();
        let placement = OrderPlacement {
            order_id: Uuid::new_v4(),
            code: OrderCode::from_sequence(1),
            deductions: vec![
                StockDeduction {
                    fabric_id: Uuid::new_v4(),
                    requested: 2.0,
                    applied: 2.0,
                    remaining: 2.0,
                },
                StockDeduction {
                    fabric_id: Uuid::new_v4(),
                    requested: 5.0,
                    applied: 1.5,
                    remaining: 0.0,
                },
            ],
        };
        metrics.record_order_created(&placement);

        let gathered = metrics.registry.gather();
        let created = gathered.iter().find(|m| m.name() == "sewin_orders_created_total").unwrap();
        assert_eq!(created.metric[0].counter.value, Some(1.0));
        let meters = gathered.iter().find(|m| m.name() == "sewin_fabric_meters_deducted_total").unwrap();
        assert_eq!(meters.metric[0].counter.value, Some(3.5));
        let clamped = gathered.iter().find(|m| m.name() == "sewin_fabric_stock_clamped_total").unwrap();
        assert_eq!(clamped.metric[0].counter.value, Some(1.0));
    }

    #[test]
    fn test_record_status_changes() {
        let metrics = Metrics::new().unwrap();
        metrics.record_status_change(OrderStatus::Cutting);
        metrics.record_status_change(OrderStatus::Sewing);
        metrics.record_status_change(OrderStatus::Cutting);

        let gathered = metrics.registry.gather();
        let changes = gathered.iter().find(|m| m.name() == "sewin_order_status_changes_total").unwrap();
        assert_eq!(changes.metric.len(), 2); // Two different status labels
    }

    #[test]
    fn test_low_stock_gauge() {
        let metrics = Metrics::new().unwrap();
        metrics.set_low_stock(3);
        metrics.set_low_stock(2);

        let gathered = metrics.registry.gather();
        let gauge = gathered.iter().find(|m| m.name() == "sewin_low_stock_fabrics").unwrap();
        assert_eq!(gauge.metric[0].gauge.value, Some(2.0));
    }
}
