// ============================================================================
// Storage Layer - where the ledger document is kept between runs
// ============================================================================
//
// - KeyValueStore: async get/set of whole string values by key
// - InMemoryStore / FileStore: the two implementations
// - Document: JSON load/save of the ledger with corrupt-as-missing semantics
//
// ============================================================================

pub mod local_store;
pub mod document;

pub use local_store::{FileStore, InMemoryStore, KeyValueStore};
pub use document::{load_ledger, save_ledger, LoadOutcome, DEFAULT_STORAGE_KEY};
