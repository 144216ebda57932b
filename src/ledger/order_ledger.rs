use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use chrono::Utc;

use crate::domain::customer::{
    Customer, CustomerCommand, CustomerError, CustomerEvent, CustomerPatch, NewCustomer,
    NewMeasurementSet,
};
use crate::domain::fabric::{Fabric, FabricCatalog, FabricError, FabricInventory, FabricPatch, NewFabric, StockDeduction};
use crate::domain::order::{Order, OrderCode, OrderCommand, OrderItem, OrderPlaced, OrderStatus, PaymentQuote};
use crate::event_sourcing::{Aggregate, DomainEvent};
use crate::session::User;
use super::commands::{LedgerCommand, LedgerOutcome};
use super::errors::LedgerError;
use super::views;

// ============================================================================
// Order Ledger - the persisted shop document
// ============================================================================
//
// Serialized as one JSON object: `user`, `customers`, `fabrics`, `orders`,
// `seq`. Missing keys fall back to an empty document with `seq = 1`.
//
// Every mutation is a single `&mut self` call, so placing an order, taking
// its fabric off the shelf and bumping the sequence are observed together.
// Lists are kept newest first.
//
// ============================================================================

/// Input for placing an order; the price breakdown is computed by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub items: Vec<OrderItem>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    pub payment: PaymentQuote,
}

impl NewOrder {
    pub fn new(customer_id: Uuid, items: Vec<OrderItem>, payment: PaymentQuote) -> Self {
        Self {
            customer_id,
            items,
            assigned_to: None,
            due_date: None,
            payment,
        }
    }
}

/// Result of placing an order, including what came off the shelf
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlacement {
    pub order_id: Uuid,
    pub code: OrderCode,
    pub deductions: Vec<StockDeduction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderLedger {
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<User>,
    customers: Vec<Customer>,
    fabrics: FabricCatalog,
    orders: Vec<Order>,
    /// Sequence number the next order code is built from; `null` reads as 1
    #[serde(deserialize_with = "sequence_or_first")]
    seq: u64,
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self {
            user: None,
            customers: Vec::new(),
            fabrics: FabricCatalog::new(),
            orders: Vec::new(),
            seq: 1,
        }
    }
}

fn sequence_or_first<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(1))
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        customers: Vec<Customer>,
        fabrics: FabricCatalog,
        orders: Vec<Order>,
        seq: u64,
    ) -> Self {
        Self {
            user: None,
            customers,
            fabrics,
            orders,
            seq,
        }
    }

    /// No customers, fabrics or orders at all
    pub fn is_blank(&self) -> bool {
        self.customers.is_empty() && self.fabrics.is_empty() && self.orders.is_empty()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn fabrics(&self) -> &FabricCatalog {
        &self.fabrics
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn next_sequence(&self) -> u64 {
        self.seq
    }

    pub fn customer(&self, customer_id: Uuid) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    pub fn order(&self, order_id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == order_id)
    }

    pub fn low_stock(&self) -> Vec<&Fabric> {
        views::low_stock(&self.fabrics)
    }

    pub fn upcoming(&self) -> Vec<&Order> {
        views::upcoming(&self.orders)
    }

    // ------------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------------

    /// Place an order and return its id
    pub fn create_order(&mut self, new_order: NewOrder) -> Uuid {
        self.place_order(new_order).order_id
    }

    /// Place an order: assign the next code, stamp the Pending timeline entry,
    /// and take each referenced fabric's summed meters off its stock once.
    pub fn place_order(&mut self, new_order: NewOrder) -> OrderPlacement {
        let placed = OrderPlaced {
            order_id: Uuid::new_v4(),
            code: OrderCode::from_sequence(self.seq),
            customer_id: new_order.customer_id,
            items: new_order.items,
            assigned_to: new_order.assigned_to,
            due_date: new_order.due_date,
            quote: new_order.payment,
            placed_at: Utc::now(),
        };

        self.check_measurement_sets(&placed.items);

        let order = Order::place(&placed);
        let deductions: Vec<StockDeduction> = fabric_usage(order.items())
            .into_iter()
            .filter_map(|(fabric_id, meters)| {
                let deduction = self.fabrics.decrement_stock(fabric_id, meters);
                if deduction.is_none() {
                    tracing::debug!(fabric_id = %fabric_id, meters, "Order references unknown fabric, no stock taken");
                }
                deduction
            })
            .collect();

        for deduction in deductions.iter().filter(|d| d.was_clamped()) {
            tracing::warn!(
                fabric_id = %deduction.fabric_id,
                requested = deduction.requested,
                applied = deduction.applied,
                "Order needs more fabric than in stock, stock emptied"
            );
        }

        self.orders.insert(0, order);
        self.seq = self.seq.saturating_add(1);

        tracing::info!(
            order_id = %placed.order_id,
            code = %placed.code,
            customer_id = %placed.customer_id,
            item_count = placed.items.len(),
            fabrics_touched = deductions.len(),
            "Order placed"
        );

        OrderPlacement {
            order_id: placed.order_id,
            code: placed.code,
            deductions,
        }
    }

    /// Append a status change. Any status is accepted, in any order.
    pub fn update_order_status(
        &mut self,
        order_id: Uuid,
        status: OrderStatus,
        note: Option<String>,
    ) -> Option<&Order> {
        self.execute_on_order(order_id, OrderCommand::UpdateStatus { status, note })
    }

    /// Add `amount` to what has been paid and reclassify the payment.
    /// The amount is expected to be positive; it is not checked here.
    pub fn record_payment(&mut self, order_id: Uuid, amount: f64) -> Option<&Order> {
        self.execute_on_order(order_id, OrderCommand::RecordPayment { amount })
    }

    fn execute_on_order(&mut self, order_id: Uuid, command: OrderCommand) -> Option<&Order> {
        let Some(order) = self.orders.iter_mut().find(|o| o.id() == order_id) else {
            tracing::warn!(order_id = %order_id, command = ?command, "Unknown order, command ignored");
            return None;
        };

        match order.execute(&command) {
            Ok(events) => {
                for event in &events {
                    tracing::info!(
                        order_id = %order_id,
                        code = %order.code(),
                        event_type = event.event_type(),
                        status = %order.status(),
                        payment_status = %order.payment().status,
                        "Order event applied"
                    );
                }
            }
            Err(e) => {
                tracing::error!(order_id = %order_id, error = %e, "Order command failed");
            }
        }

        Some(&*order)
    }

    /// Soft check: an item's measurement set should be for the same garment
    fn check_measurement_sets(&self, items: &[OrderItem]) {
        for item in items {
            let Some(set_id) = item.measurement_set_id else {
                continue;
            };
            let set = self
                .customers
                .iter()
                .find_map(|customer| customer.measurement_set(set_id));

            match set {
                Some(set) if set.garment_type != item.garment_type => {
                    tracing::warn!(
                        item_id = %item.id,
                        set_id = %set_id,
                        item_garment = %item.garment_type,
                        set_garment = %set.garment_type,
                        "Measurement set is for a different garment"
                    );
                }
                Some(_) => {}
                None => {
                    tracing::debug!(item_id = %item.id, set_id = %set_id, "Measurement set not found");
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Customers
    // ------------------------------------------------------------------------

    pub fn add_customer(&mut self, new_customer: NewCustomer) -> Result<Uuid, CustomerError> {
        let registered = CustomerEvent::Registered(Customer::register(new_customer)?);
        let customer = Customer::apply_first_event(&registered)?;
        let customer_id = customer.id;

        tracing::info!(
            customer_id = %customer_id,
            event_type = registered.event_type(),
            measurement_sets = customer.measurement_sets.len(),
            "Customer registered"
        );

        self.customers.insert(0, customer);
        Ok(customer_id)
    }

    pub fn update_customer(
        &mut self,
        customer_id: Uuid,
        patch: CustomerPatch,
    ) -> Result<Option<&Customer>, CustomerError> {
        self.execute_on_customer(customer_id, CustomerCommand::UpdateProfile(patch))
    }

    /// Returns the id of the new set
    pub fn add_measurement_set(
        &mut self,
        customer_id: Uuid,
        set: NewMeasurementSet,
    ) -> Result<Option<Uuid>, CustomerError> {
        let customer = self.execute_on_customer(customer_id, CustomerCommand::AddMeasurementSet(set))?;
        Ok(customer.and_then(|c| c.measurement_sets.last()).map(|s| s.id))
    }

    fn execute_on_customer(
        &mut self,
        customer_id: Uuid,
        command: CustomerCommand,
    ) -> Result<Option<&Customer>, CustomerError> {
        let Some(customer) = self.customers.iter_mut().find(|c| c.id == customer_id) else {
            tracing::warn!(customer_id = %customer_id, "Unknown customer, command ignored");
            return Ok(None);
        };

        for event in customer.execute(&command)? {
            tracing::info!(customer_id = %customer_id, event_type = event.event_type(), "Customer event applied");
        }

        Ok(Some(&*customer))
    }

    // ------------------------------------------------------------------------
    // Fabrics
    // ------------------------------------------------------------------------

    pub fn add_fabric(&mut self, new_fabric: NewFabric) -> Result<Uuid, FabricError> {
        let fabric_id = self.fabrics.add(new_fabric)?;
        tracing::info!(fabric_id = %fabric_id, "Fabric added");
        Ok(fabric_id)
    }

    pub fn update_fabric(&mut self, fabric_id: Uuid, patch: FabricPatch) -> Option<&Fabric> {
        let fabric = self.fabrics.update(fabric_id, patch);
        if fabric.is_none() {
            tracing::warn!(fabric_id = %fabric_id, "Unknown fabric, update ignored");
        }
        fabric
    }

    pub fn restock_fabric(&mut self, fabric_id: Uuid, meters: f64) -> Option<&Fabric> {
        let fabric = self.fabrics.restock(fabric_id, meters);
        match fabric {
            Some(f) => tracing::info!(fabric_id = %fabric_id, meters, stock = f.stock_meters, "Fabric restocked"),
            None => tracing::warn!(fabric_id = %fabric_id, "Unknown fabric, restock ignored"),
        }
        fabric
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    // ------------------------------------------------------------------------
    // Command dispatch
    // ------------------------------------------------------------------------

    /// Route a command to the matching operation
    pub fn apply(&mut self, command: LedgerCommand) -> Result<LedgerOutcome, LedgerError> {
        let outcome = match command {
            LedgerCommand::CreateOrder(new_order) => {
                LedgerOutcome::OrderCreated(self.place_order(new_order))
            }
            LedgerCommand::UpdateOrderStatus { order_id, status, note } => {
                match self.update_order_status(order_id, status, note) {
                    Some(order) => LedgerOutcome::OrderStatusChanged {
                        order_id,
                        status: order.status(),
                    },
                    None => LedgerOutcome::Ignored,
                }
            }
            LedgerCommand::RecordPayment { order_id, amount } => {
                match self.record_payment(order_id, amount) {
                    Some(order) => LedgerOutcome::PaymentRecorded {
                        order_id,
                        status: order.payment().status,
                    },
                    None => LedgerOutcome::Ignored,
                }
            }
            LedgerCommand::AddCustomer(new_customer) => {
                LedgerOutcome::CustomerAdded(self.add_customer(new_customer)?)
            }
            LedgerCommand::UpdateCustomer { customer_id, patch } => {
                match self.update_customer(customer_id, patch)? {
                    Some(_) => LedgerOutcome::CustomerUpdated(customer_id),
                    None => LedgerOutcome::Ignored,
                }
            }
            LedgerCommand::AddMeasurementSet { customer_id, set } => {
                match self.add_measurement_set(customer_id, set)? {
                    Some(set_id) => LedgerOutcome::MeasurementSetAdded { customer_id, set_id },
                    None => LedgerOutcome::Ignored,
                }
            }
            LedgerCommand::AddFabric(new_fabric) => {
                LedgerOutcome::FabricAdded(self.add_fabric(new_fabric)?)
            }
            LedgerCommand::UpdateFabric { fabric_id, patch } => {
                match self.update_fabric(fabric_id, patch) {
                    Some(_) => LedgerOutcome::FabricUpdated(fabric_id),
                    None => LedgerOutcome::Ignored,
                }
            }
            LedgerCommand::RestockFabric { fabric_id, meters } => {
                match self.restock_fabric(fabric_id, meters) {
                    Some(_) => LedgerOutcome::FabricUpdated(fabric_id),
                    None => LedgerOutcome::Ignored,
                }
            }
            LedgerCommand::SignIn(user) => {
                self.set_user(user);
                LedgerOutcome::SessionChanged
            }
            LedgerCommand::SignOut => {
                self.sign_out();
                LedgerOutcome::SessionChanged
            }
        };

        Ok(outcome)
    }
}

/// Meters per fabric across all items, in order of first appearance
fn fabric_usage(items: &[OrderItem]) -> Vec<(Uuid, f64)> {
    let mut usage: Vec<(Uuid, f64)> = Vec::new();
    for (fabric_id, meters) in items.iter().filter_map(OrderItem::fabric_consumption) {
        match usage.iter_mut().find(|(id, _)| *id == fabric_id) {
            Some((_, total)) => *total += meters,
            None => usage.push((fabric_id, meters)),
        }
    }
    usage
}

// ============================================================================
// Unit Tests
// ============================================================================
