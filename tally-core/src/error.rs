use thiserror::Error;

/// Failures surfaced by the ledger: storage problems and rejected input.
///
/// Everything else (empty ledger, no keyword match, zero totals) is a
/// normal outcome, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Storage exists but could not be read or parsed. Load aborts.
    #[error("ledger storage unreadable ({location}): {reason}")]
    StorageUnreadable { location: String, reason: String },

    /// Writing the ledger failed. The pending append is not durable.
    #[error("ledger storage unwritable ({location}): {reason}")]
    StorageUnwritable { location: String, reason: String },

    /// Negative amount or blank description. Never reaches the ledger.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl LedgerError {
    pub fn unreadable(location: impl Into<String>, reason: impl ToString) -> Self {
        LedgerError::StorageUnreadable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn unwritable(location: impl Into<String>, reason: impl ToString) -> Self {
        LedgerError::StorageUnwritable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}
