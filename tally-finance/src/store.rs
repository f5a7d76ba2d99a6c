//! Ledger persistence: a backend trait with a CSV file implementation and an
//! in-memory one, plus `LedgerStore`, which ties storage to the categorizer.

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tally_core::{ExpenseRecord, LedgerError, validate_entry};
use tracing::{debug, info, warn};

use crate::category_rules::classify;
use crate::csv_codec::{read_ledger, write_ledger};
use crate::Ledger;

/// Somewhere a ledger can be loaded from and written back to.
pub trait LedgerBackend {
    /// Read every persisted record. Missing storage is an empty ledger.
    fn load(&self) -> Result<Ledger, LedgerError>;

    /// Replace the stored contents with `ledger`.
    fn persist(&self, ledger: &Ledger) -> Result<(), LedgerError>;

    /// Human-readable location, used in errors and logs.
    fn location(&self) -> String;
}

/// Ledger kept in a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LedgerBackend for CsvFileStore {
    fn load(&self) -> Result<Ledger, LedgerError> {
        let location = self.location();
        // Only NotFound means empty; any other stat failure is unreadable
        match fs::metadata(&self.path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %location, "no ledger file yet, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(LedgerError::unreadable(&location, e)),
        }

        let file = File::open(&self.path).map_err(|e| LedgerError::unreadable(&location, e))?;
        let ledger = read_ledger(file, &location)?;
        debug!(path = %location, records = ledger.len(), "loaded ledger");
        Ok(ledger)
    }

    fn persist(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        let location = self.location();
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| LedgerError::unwritable(&location, e))?;
        }

        // Write beside the target, then rename over it, so the old file
        // survives any failure before the rename.
        let tmp = self.temp_path();
        if let Err(e) = write_then_rename(&tmp, &self.path, ledger, &location) {
            if tmp.is_file() {
                let _ = fs::remove_file(&tmp);
            }
            return Err(e);
        }

        debug!(path = %location, records = ledger.len(), "persisted ledger");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn write_then_rename(
    tmp: &Path,
    target: &Path,
    ledger: &Ledger,
    location: &str,
) -> Result<(), LedgerError> {
    let mut file = File::create(tmp).map_err(|e| LedgerError::unwritable(location, e))?;
    write_ledger(&mut file, ledger, location)?;
    file.flush().map_err(|e| LedgerError::unwritable(location, e))?;
    file.sync_all().map_err(|e| LedgerError::unwritable(location, e))?;
    fs::rename(tmp, target).map_err(|e| LedgerError::unwritable(location, e))
}

/// In-memory backend holding the same CSV bytes a file would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: RefCell<Option<Vec<u8>>>,
    read_only: bool,
}

impl MemoryStore {
    /// Store with nothing persisted yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw file contents
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
            read_only: false,
        }
    }

    /// Store whose every write fails
    pub fn read_only() -> Self {
        Self {
            contents: RefCell::new(None),
            read_only: true,
        }
    }

    /// Current contents as text, if anything has been persisted
    pub fn contents(&self) -> Option<String> {
        self.contents
            .borrow()
            .as_ref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl LedgerBackend for MemoryStore {
    fn load(&self) -> Result<Ledger, LedgerError> {
        match self.contents.borrow().as_deref() {
            None => Ok(Ledger::new()),
            Some(bytes) => read_ledger(bytes, &self.location()),
        }
    }

    fn persist(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        if self.read_only {
            return Err(LedgerError::unwritable(self.location(), "store is read-only"));
        }
        let mut buf = Vec::new();
        write_ledger(&mut buf, ledger, &self.location())?;
        *self.contents.borrow_mut() = Some(buf);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Load, persist, and record expenses against a single backend.
#[derive(Debug)]
pub struct LedgerStore<B: LedgerBackend> {
    backend: B,
}

impl LedgerStore<CsvFileStore> {
    /// Store backed by the CSV file at `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(CsvFileStore::new(path))
    }
}

impl<B: LedgerBackend> LedgerStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load(&self) -> Result<Ledger, LedgerError> {
        self.backend.load()
    }

    pub fn persist(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        self.backend.persist(ledger)
    }

    /// Validate, classify, append, and persist one expense.
    ///
    /// The returned ledger is only handed back once it has been written, so
    /// on any error the caller still holds the last durable ledger.
    pub fn record(
        &self,
        ledger: &Ledger,
        date: NaiveDate,
        description: &str,
        amount: i64,
    ) -> Result<Ledger, LedgerError> {
        if let Err(e) = validate_entry(description, amount) {
            warn!(error = %e, "rejected expense");
            return Err(e);
        }

        let c = classify(description);
        let record = ExpenseRecord::new(date, description, amount, c.category, c.kind)?;
        let next = ledger.append(record)?;
        self.backend.persist(&next)?;

        info!(
            category = %c.category,
            kind = %c.kind,
            amount,
            records = next.len(),
            "recorded expense"
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Category, Kind};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn test_memory_store_starts_empty() {
        let store = LedgerStore::new(MemoryStore::new());
        let ledger = store.load().unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_amount(), 0);
        assert!(store.backend().contents().is_none());
    }

    #[test]
    fn test_record_classifies_and_persists() {
        let store = LedgerStore::new(MemoryStore::new());
        let ledger = store.load().unwrap();

        let ledger = store.record(&ledger, day(1), "Uber to airport", 15000).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].category, Category::Transport);
        assert_eq!(ledger.records()[0].kind, Kind::Necessary);
        assert_eq!(ledger.total_by_category(Category::Transport), 15000);

        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn test_record_rejects_negative_amount() {
        let store = LedgerStore::new(MemoryStore::new());
        let ledger = store.record(&Ledger::new(), day(1), "Coffee", 8000).unwrap();

        let err = store.record(&ledger, day(2), "Coffee", -5).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRecord(_)));
        assert_eq!(ledger.len(), 1);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_record_rejects_blank_description() {
        let store = LedgerStore::new(MemoryStore::new());
        let err = store.record(&Ledger::new(), day(1), "  ", 100).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRecord(_)));
        assert!(store.backend().contents().is_none());
    }

    #[test]
    fn test_failed_persist_is_surfaced() {
        let store = LedgerStore::new(MemoryStore::read_only());
        let ledger = Ledger::new();
        let err = store.record(&ledger, day(1), "Beer", 20000).unwrap_err();
        assert!(matches!(err, LedgerError::StorageUnwritable { .. }));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_corrupt_memory_contents() {
        let store = LedgerStore::new(MemoryStore::with_contents("not,a,ledger\n"));
        assert!(matches!(store.load(), Err(LedgerError::StorageUnreadable { .. })));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let store = CsvFileStore::new("/data/expenses.csv");
        assert_eq!(store.temp_path(), PathBuf::from("/data/expenses.csv.tmp"));
    }
}
