//! Budgeting tips driven by plain threshold checks over the ledger totals.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tally_core::Category;

use crate::Ledger;
use crate::summary::format_amount;

/// Limits above which the advisor speaks up. Comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorThresholds {
    /// Ant-expense total that triggers a warning
    pub ant_expense_limit: i64,
    /// Vehicle category total that triggers a maintenance reminder
    pub vehicle_limit: i64,
    /// Price of one snack or bus fare, used to make the ant total tangible
    pub ant_unit_cost: i64,
}

impl Default for AdvisorThresholds {
    fn default() -> Self {
        Self {
            ant_expense_limit: 50_000,
            vehicle_limit: 200_000,
            ant_unit_cost: 10_000,
        }
    }
}

/// Always shown alongside any advice
pub const GENERAL_TIPS: [&str; 3] = [
    "If you go out drinking, set a cash budget before you leave.",
    "Use public transport once or twice a week instead of rideshare.",
    "Carry a water bottle instead of buying drinks on the street.",
];

/// A single flagged condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Advice {
    /// Small purchases have added up past the limit
    AntExpenses {
        total: i64,
        /// How many snacks or fares the total is worth
        equivalent_units: Option<i64>,
    },
    /// The vehicle is getting expensive
    VehicleCosts { total: i64 },
}

impl Advice {
    pub fn message(&self) -> String {
        match self {
            Advice::AntExpenses {
                total,
                equivalent_units: Some(units),
            } => format!(
                "Careful! You have spent {} on ant expenses. That is about {} snacks or bus fares.",
                format_amount(*total),
                units
            ),
            Advice::AntExpenses {
                total,
                equivalent_units: None,
            } => format!(
                "Careful! You have spent {} on ant expenses.",
                format_amount(*total)
            ),
            Advice::VehicleCosts { total } => format!(
                "Your vehicle has cost you {}. Check tire pressure and filters to save fuel.",
                format_amount(*total)
            ),
        }
    }
}

/// Flag every threshold the ledger exceeds. Empty ledgers get no advice.
pub fn advise(ledger: &Ledger, thresholds: &AdvisorThresholds) -> Vec<Advice> {
    let mut out = Vec::new();
    if ledger.is_empty() {
        return out;
    }

    let ant = ledger.ant_expense_total();
    if ant > thresholds.ant_expense_limit {
        let equivalent_units = (thresholds.ant_unit_cost > 0)
            .then(|| round_half_even(ant, thresholds.ant_unit_cost));
        out.push(Advice::AntExpenses {
            total: ant,
            equivalent_units,
        });
    }

    let vehicle = ledger.total_by_category(Category::Vehicle);
    if vehicle > thresholds.vehicle_limit {
        out.push(Advice::VehicleCosts { total: vehicle });
    }

    out
}

/// `total / unit` rounded to the nearest integer, ties to even.
/// Expects `total >= 0` and `unit > 0`; never overflows.
fn round_half_even(total: i64, unit: i64) -> i64 {
    let q = total / unit;
    let r = total % unit;
    match r.cmp(&(unit - r)) {
        Ordering::Less => q,
        Ordering::Greater => q + 1,
        Ordering::Equal if q % 2 == 0 => q,
        Ordering::Equal => q + 1,
    }
}
