pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::{FiscalCheckClient, InMemoryBillStore};
pub use crate::core::{
    calculator::SplitCalculator, normalizer::BillNormalizer, receipt_parser::ReceiptTextExtractor,
    service::BillService,
};
pub use utils::error::{Result, SplitError};
