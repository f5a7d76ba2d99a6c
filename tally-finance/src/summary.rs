//! Statistics view data: totals plus the per-category distribution.

use serde::Serialize;
use tally_core::Category;

use crate::Ledger;

/// One slice of the category distribution
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub total: i64,
    /// Percentage of the grand total (0.0 - 100.0)
    pub share: f64,
}

/// Everything the statistics view shows besides the raw table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub record_count: usize,
    pub total: i64,
    pub ant_expense_total: i64,
    /// Largest category first
    pub categories: Vec<CategoryShare>,
}

impl Summary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let total = ledger.total_amount();

        let mut categories: Vec<CategoryShare> = ledger
            .group_totals_by_category()
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category,
                total: amount,
                share: if total > 0 {
                    amount as f64 * 100.0 / total as f64
                } else {
                    0.0
                },
            })
            .collect();
        // Ties broken by category so output is stable
        categories.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));

        Summary {
            record_count: ledger.len(),
            total,
            ant_expense_total: ledger.ant_expense_total(),
            categories,
        }
    }
}

/// "$1,234,567" style amount, as the reports show money.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if amount < 0 {
        out.push('-');
    }
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
