use uuid::Uuid;

use crate::domain::customer::{CustomerPatch, NewCustomer, NewMeasurementSet};
use crate::domain::fabric::{FabricPatch, NewFabric};
use crate::domain::order::{OrderStatus, PaymentStatus};
use crate::session::User;
use super::order_ledger::{NewOrder, OrderPlacement};

// ============================================================================
// Ledger Commands - every mutation the surrounding UI can ask for
// ============================================================================

#[derive(Debug, Clone)]
pub enum LedgerCommand {
    CreateOrder(NewOrder),
    UpdateOrderStatus {
        order_id: Uuid,
        status: OrderStatus,
        note: Option<String>,
    },
    RecordPayment {
        order_id: Uuid,
        amount: f64,
    },
    AddCustomer(NewCustomer),
    UpdateCustomer {
        customer_id: Uuid,
        patch: CustomerPatch,
    },
    AddMeasurementSet {
        customer_id: Uuid,
        set: NewMeasurementSet,
    },
    AddFabric(NewFabric),
    UpdateFabric {
        fabric_id: Uuid,
        patch: FabricPatch,
    },
    RestockFabric {
        fabric_id: Uuid,
        meters: f64,
    },
    SignIn(User),
    SignOut,
}

impl LedgerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerCommand::CreateOrder(_) => "CreateOrder",
            LedgerCommand::UpdateOrderStatus { .. } => "UpdateOrderStatus",
            LedgerCommand::RecordPayment { .. } => "RecordPayment",
            LedgerCommand::AddCustomer(_) => "AddCustomer",
            LedgerCommand::UpdateCustomer { .. } => "UpdateCustomer",
            LedgerCommand::AddMeasurementSet { .. } => "AddMeasurementSet",
            LedgerCommand::AddFabric(_) => "AddFabric",
            LedgerCommand::UpdateFabric { .. } => "UpdateFabric",
            LedgerCommand::RestockFabric { .. } => "RestockFabric",
            LedgerCommand::SignIn(_) => "SignIn",
            LedgerCommand::SignOut => "SignOut",
        }
    }
}

/// What a command did to the document
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerOutcome {
    OrderCreated(OrderPlacement),
    OrderStatusChanged { order_id: Uuid, status: OrderStatus },
    PaymentRecorded { order_id: Uuid, status: PaymentStatus },
    CustomerAdded(Uuid),
    CustomerUpdated(Uuid),
    MeasurementSetAdded { customer_id: Uuid, set_id: Uuid },
    FabricAdded(Uuid),
    FabricUpdated(Uuid),
    SessionChanged,
    /// The command named an order, customer or fabric that does not exist
    Ignored,
}

impl LedgerOutcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, LedgerOutcome::Ignored)
    }
}
