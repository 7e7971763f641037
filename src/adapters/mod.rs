// Adapters layer: concrete implementations of the domain ports (storage, http).

pub mod fiscal_check;
pub mod memory_store;

pub use fiscal_check::FiscalCheckClient;
pub use memory_store::InMemoryBillStore;
