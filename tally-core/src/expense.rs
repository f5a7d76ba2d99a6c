//! Expense record types: one logged purchase plus its category/kind tags

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::LedgerError;

/// A single logged expense. Category and kind are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ExpenseRecord {
    /// Date of the purchase (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Free text as the user typed it
    pub description: String,
    /// Integer amount in the user's currency, never negative
    pub amount: i64,
    /// Spending bucket
    pub category: Category,
    /// How avoidable the spend is
    pub kind: Kind,
}

/// Coarse spending buckets assigned by the categorizer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Vehicle,
    Transport,
    Craving,
    Leisure,
    Household,
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Vehicle,
        Category::Transport,
        Category::Craving,
        Category::Leisure,
        Category::Household,
        Category::Miscellaneous,
    ];

    /// Label written to storage and shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Category::Vehicle => "Vehicle",
            Category::Transport => "Transport",
            Category::Craving => "Craving",
            Category::Leisure => "Leisure",
            Category::Household => "Household",
            Category::Miscellaneous => "Miscellaneous",
        }
    }
}

/// Budgeting tag paired with a category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Kind {
    #[serde(rename = "Necessary (but optimizable)")]
    NecessaryOptimizable,
    #[serde(rename = "Necessary")]
    Necessary,
    #[serde(rename = "Ant-expense")]
    AntExpense,
    #[serde(rename = "Discretionary")]
    Discretionary,
    #[serde(rename = "Mandatory")]
    Mandatory,
    #[serde(rename = "General")]
    General,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::NecessaryOptimizable,
        Kind::Necessary,
        Kind::AntExpense,
        Kind::Discretionary,
        Kind::Mandatory,
        Kind::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Kind::NecessaryOptimizable => "Necessary (but optimizable)",
            Kind::Necessary => "Necessary",
            Kind::AntExpense => "Ant-expense",
            Kind::Discretionary => "Discretionary",
            Kind::Mandatory => "Mandatory",
            Kind::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.label() == s)
            .ok_or_else(|| format!("unknown kind '{s}'"))
    }
}

/// Largest amount a single record may carry (one trillion).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Reject input that must never reach the ledger: a blank description, a
/// negative amount, or one above [`MAX_AMOUNT`]. Runs before classification.
pub fn validate_entry(description: &str, amount: i64) -> Result<(), LedgerError> {
    if description.trim().is_empty() {
        return Err(LedgerError::InvalidRecord("description is empty".to_string()));
    }
    if amount < 0 {
        return Err(LedgerError::InvalidRecord(format!(
            "amount must not be negative (got {amount})"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::InvalidRecord(format!(
            "amount exceeds {MAX_AMOUNT} (got {amount})"
        )));
    }
    Ok(())
}

impl ExpenseRecord {
    /// Build a record from already-classified parts, checking the invariants.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: i64,
        category: Category,
        kind: Kind,
    ) -> Result<Self, LedgerError> {
        let record = Self {
            date,
            description: description.into(),
            amount,
            category,
            kind,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_entry(&self.description, self.amount)
    }

    /// True for small recurring discretionary spend
    pub fn is_ant_expense(&self) -> bool {
        self.kind == Kind::AntExpense
    }
}
