use std::sync::Arc;
use chrono::Utc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sewin_ledger::config::{AppConfig, DEFAULT_LOG_FILTER};
use sewin_ledger::domain::GarmentType;
use sewin_ledger::domain::order::{format_due_date, OrderItem, OrderStatus, PaymentQuote};
use sewin_ledger::ledger::{
    monthly_totals, render_receipt, top_fabrics, DashboardSummary, LedgerCommand,
    LedgerCommandHandler, LedgerOutcome, NewOrder, format_money,
};
use sewin_ledger::metrics::Metrics;
use sewin_ledger::session::{sign_in, UserRole};
use sewin_ledger::storage::FileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging; RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
        )
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!("🧵 Starting Sew-In ledger demo");
    tracing::info!(data_dir = %config.data_dir.display(), key = %config.storage_key, "Using file store");

    // === 1. Metrics ===
    let metrics = Arc::new(Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 2. Open the ledger (seeds demo data into an empty store) ===
    let store = Arc::new(FileStore::new(&config.data_dir));
    let mut handler = LedgerCommandHandler::open_with_metrics(store, &config, Some(metrics.clone())).await?;

    if let Some(user) = sign_in("Sarah", UserRole::Staff) {
        handler.handle(LedgerCommand::SignIn(user)).await?;
    }

    // === 3. Place an order for the first customer ===
    let Some(customer) = handler.ledger().customers().first().cloned() else {
        tracing::warn!("No customers in the ledger, nothing to demonstrate");
        return Ok(());
    };
    let set_id = customer
        .measurement_sets
        .iter()
        .find(|s| s.garment_type == GarmentType::Shirt)
        .map(|s| s.id);
    let fabric_id = handler
        .ledger()
        .fabrics()
        .iter()
        .find(|f| f.category == GarmentType::Shirt)
        .map(|f| f.id);

    let mut item = OrderItem::new(GarmentType::Shirt).with_notes("Slim fit");
    if let Some(set_id) = set_id {
        item = item.with_measurement_set(set_id);
    }
    if let Some(fabric_id) = fabric_id {
        item = item.with_fabric(fabric_id, 1.5);
    }
    let items = vec![item];
    let quote = PaymentQuote::compute(handler.ledger().fabrics(), &items, 20.0, 5.0, 0.0);

    let mut new_order = NewOrder::new(customer.id, items, quote);
    new_order.assigned_to = Some("Sarah".to_string());
    new_order.due_date = Some(format_due_date(Utc::now() + chrono::Duration::days(7)));

    let LedgerOutcome::OrderCreated(placement) = handler.handle(LedgerCommand::CreateOrder(new_order)).await? else {
        anyhow::bail!("Order placement did not create an order");
    };
    tracing::info!("✅ Order created: {} ({})", placement.code, placement.order_id);

    // === 4. Walk it through the workshop and take payment ===
    handler
        .handle(LedgerCommand::RecordPayment {
            order_id: placement.order_id,
            amount: (quote.total / 2.0).max(1.0),
        })
        .await?;

    let mut status = OrderStatus::Pending;
    while let Some(next) = status.next() {
        handler
            .handle(LedgerCommand::UpdateOrderStatus {
                order_id: placement.order_id,
                status: next,
                note: None,
            })
            .await?;
        status = next;
    }

    if let Some(order) = handler.ledger().order(placement.order_id) {
        let due = order.payment().amount_due();
        if due > 0.0 {
            handler
                .handle(LedgerCommand::RecordPayment {
                    order_id: placement.order_id,
                    amount: due,
                })
                .await?;
        }
    }

    // === 5. Print what the shop screens would show ===
    let ledger = handler.ledger();
    if let Some(order) = ledger.order(placement.order_id) {
        println!("{}\n", render_receipt(order, ledger.customer(order.customer_id()), ledger.fabrics()));
    }

    let summary = DashboardSummary::from_ledger(ledger);
    println!(
        "Customers: {}  Orders: {}  Revenue: {}  Collected: {}  Low stock: {}",
        summary.customer_count,
        summary.order_count,
        format_money(summary.revenue),
        format_money(summary.collected),
        summary.low_stock_count
    );

    println!("\nUpcoming:");
    for order in ledger.upcoming() {
        println!("  {} due {} ({})", order.code(), order.due_date().unwrap_or("-"), order.status());
    }

    println!("\nLow stock:");
    for fabric in ledger.low_stock() {
        println!("  {} - {} m", fabric.name, fabric.stock_meters);
    }

    println!("\nLast {} months:", sewin_ledger::ledger::REPORT_MONTHS);
    for month in monthly_totals(ledger.orders(), Utc::now()) {
        println!("  {} {}: {} orders, {}", month.label, month.year, month.order_count, format_money(month.revenue));
    }

    println!("\nTop fabrics:");
    for usage in top_fabrics(ledger.fabrics(), ledger.orders()) {
        println!("  {}: {} items", usage.name, usage.used);
    }

    handler.handle(LedgerCommand::SignOut).await?;
    tracing::info!("🎉 Demo complete!");

    Ok(())
}
