// ============================================================================
// Sew-In Ledger - order, payment and fabric bookkeeping for a tailoring shop
// ============================================================================
//
// - domain: customer and order aggregates, fabric inventory
// - ledger: the persisted shop document, its operations and derived views
// - storage: key-value stores and JSON document persistence
// - config / metrics / session: environment config, Prometheus, sign-in stub
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod ledger;
pub mod metrics;
pub mod session;
pub mod storage;
