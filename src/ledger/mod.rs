// ============================================================================
// Ledger - the shop's single state document and everything that mutates it
// ============================================================================
//
// - OrderLedger: customers, fabrics, orders and the order sequence, plus the
//   operations that change them (order placement with stock deduction,
//   status changes, payments, customer and fabric upkeep)
// - Commands / outcomes routed through the command handler
// - Derived views and reports computed on demand
// - Demo seed and receipt rendering
//
// ============================================================================

pub mod errors;
pub mod commands;
pub mod order_ledger;
pub mod views;
pub mod reports;
pub mod receipt;
pub mod seed;
pub mod command_handler;

pub use errors::*;
pub use commands::*;
pub use order_ledger::*;
pub use views::*;
pub use reports::*;
pub use receipt::*;
pub use seed::demo_ledger;
pub use command_handler::LedgerCommandHandler;
