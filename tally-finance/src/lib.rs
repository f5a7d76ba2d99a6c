//! tally-finance: keyword categorizer, ledger store, CSV codec, and report helpers

pub mod advisor;
pub mod category_rules;
pub mod csv_codec;
pub mod ledger;
pub mod store;
pub mod summary;

pub use advisor::{Advice, AdvisorThresholds, GENERAL_TIPS, advise};
pub use category_rules::{Classification, classify, explain};
pub use ledger::Ledger;
pub use store::{CsvFileStore, LedgerBackend, LedgerStore, MemoryStore};
pub use summary::{CategoryShare, Summary, format_amount};
