pub mod calculator;
pub mod normalizer;
pub mod receipt_parser;
pub mod service;

pub use crate::domain::model::{Bill, BillSummary, Item, Participant, ParticipantSplit};
pub use crate::domain::ports::{BillStore, ReceiptVerifier};
pub use crate::utils::error::Result;
