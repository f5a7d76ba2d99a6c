//! The in-memory ledger: an append-only, insertion-ordered list of expenses
//! plus the read-only aggregation queries the reports are built from.

use std::collections::HashMap;

use tally_core::{Category, ExpenseRecord, Kind, LedgerError};

/// Ordered collection of every expense the user has logged.
///
/// The running total always fits in an `i64`, so no aggregate can overflow:
/// every amount is non-negative and each query sums a subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
    total: i64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from records already read from storage, checking each
    /// record and the running total.
    pub fn from_records(records: Vec<ExpenseRecord>) -> Result<Self, LedgerError> {
        let mut total: i64 = 0;
        for r in &records {
            r.validate()?;
            total = checked_total(total, r.amount)?;
        }
        Ok(Self { records, total })
    }

    /// Return a new ledger with `record` at the end. `self` is left untouched,
    /// so a rejected record leaves the caller's ledger exactly as it was.
    pub fn append(&self, record: ExpenseRecord) -> Result<Ledger, LedgerError> {
        record.validate()?;
        let total = checked_total(self.total, record.amount)?;
        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.extend_from_slice(&self.records);
        records.push(record);
        Ok(Ledger { records, total })
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every amount; 0 when empty.
    pub fn total_amount(&self) -> i64 {
        self.total
    }

    /// Sum over records whose kind label contains `needle`.
    pub fn total_by_kind_substring(&self, needle: &str) -> i64 {
        self.records
            .iter()
            .filter(|r| r.kind.label().contains(needle))
            .map(|r| r.amount)
            .sum()
    }

    pub fn total_by_category(&self, category: Category) -> i64 {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.amount)
            .sum()
    }

    /// Totals partitioned by category. Categories without records are absent.
    pub fn group_totals_by_category(&self) -> HashMap<Category, i64> {
        let mut totals: HashMap<Category, i64> = HashMap::new();
        for r in &self.records {
            *totals.entry(r.category).or_insert(0) += r.amount;
        }
        totals
    }

    /// Total of all ant-expense records
    pub fn ant_expense_total(&self) -> i64 {
        self.total_by_kind_substring(Kind::AntExpense.label())
    }

    /// Records sorted by date, most recent first. Same-day records keep
    /// their insertion order.
    pub fn newest_first(&self) -> Vec<&ExpenseRecord> {
        let mut sorted: Vec<&ExpenseRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }
}

fn checked_total(total: i64, amount: i64) -> Result<i64, LedgerError> {
    total.checked_add(amount).ok_or_else(|| {
        LedgerError::InvalidRecord(format!("ledger total would overflow adding {amount}"))
    })
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
