//! Plain-text views for the stats and tips commands.

use std::fmt::Write;

use tally_finance::{AdvisorThresholds, GENERAL_TIPS, Ledger, Summary, advise, format_amount};

const EMPTY: &str = "No expenses recorded yet.\n";

pub fn render_stats(ledger: &Ledger) -> String {
    if ledger.is_empty() {
        return EMPTY.to_string();
    }

    let summary = Summary::from_ledger(ledger);
    let mut out = String::new();

    out.push_str("## Where does your money go?\n\n");
    for slice in &summary.categories {
        let bar = "#".repeat((slice.share / 5.0).round() as usize);
        let _ = writeln!(
            out,
            "{:<14} {:>14} {:>6.1}%  {}",
            slice.category.label(),
            format_amount(slice.total),
            slice.share,
            bar
        );
    }

    out.push_str("\n## Expenses (newest first)\n\n");
    let _ = writeln!(
        out,
        "{:<10}  {:<28} {:>12}  {:<13}  {}",
        "Date", "Description", "Amount", "Category", "Kind"
    );
    for r in ledger.newest_first() {
        let _ = writeln!(
            out,
            "{:<10}  {:<28} {:>12}  {:<13}  {}",
            r.date.format("%Y-%m-%d"),
            truncate(&r.description, 28),
            format_amount(r.amount),
            r.category.label(),
            r.kind.label()
        );
    }

    let _ = writeln!(out, "\nTotal spent:        {}", format_amount(summary.total));
    let _ = writeln!(
        out,
        "Ant expenses total: {}",
        format_amount(summary.ant_expense_total)
    );
    out
}

pub fn render_tips(ledger: &Ledger, thresholds: &AdvisorThresholds) -> String {
    if ledger.is_empty() {
        return EMPTY.to_string();
    }

    let mut out = String::from("## Your financial coach\n\n");
    for advice in advise(ledger, thresholds) {
        let _ = writeln!(out, "! {}", advice.message());
    }

    out.push_str("\nGeneral tips:\n");
    for tip in GENERAL_TIPS {
        let _ = writeln!(out, "- {}", tip);
    }
    out
}

/// Cut to `max` chars, marking the cut with "..."
fn truncate(s: &str, max: usize) -> String {
    // Table cells are single-line
    let flat = s.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let kept: String = flat.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
