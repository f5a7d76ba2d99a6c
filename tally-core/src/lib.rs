//! tally-core: record schema shared by the categorizer and the ledger store

pub mod error;
pub mod expense;

pub use error::LedgerError;
pub use expense::{Category, ExpenseRecord, Kind, MAX_AMOUNT, validate_entry};
