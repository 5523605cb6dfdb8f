//! Derived reporting shapes. Never stored, always recomputed from a ledger.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::GiftRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Ledger-wide budget metrics.
pub struct BudgetTotals {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    /// `total_budget - total_spent`; negative when overspent.
    pub remaining: Decimal,
    pub record_count: usize,
    pub purchased_count: usize,
}

impl BudgetTotals {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_sign_negative() && !self.remaining.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One recipient's gifts, sorted by cost descending.
pub struct RecipientSummary {
    pub recipient: String,
    pub items: Vec<GiftRecord>,
    /// Sum of per-record budgets.
    pub allotted_budget: Decimal,
    pub total_purchased_cost: Decimal,
    /// Fixed per-recipient ceiling minus purchased cost.
    pub remaining_budget: Decimal,
}

impl RecipientSummary {
    pub fn purchased_items(&self) -> impl Iterator<Item = &GiftRecord> {
        self.items.iter().filter(|item| item.purchased)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Decimal,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Chart-ready spend series for one recipient, ending with a `Remaining` point.
pub struct WaterfallSeries {
    pub recipient: String,
    pub points: Vec<SeriesPoint>,
}

impl WaterfallSeries {
    pub fn pairs(&self) -> Vec<(&str, Decimal)> {
        self.points
            .iter()
            .map(|point| (point.label.as_str(), point.value))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Aggregate count of cells that import had to substitute.
pub struct CoercionWarning {
    pub invalid_costs: usize,
    pub invalid_budgets: usize,
    pub invalid_flags: usize,
}

impl CoercionWarning {
    pub fn total(&self) -> usize {
        self.invalid_costs + self.invalid_budgets + self.invalid_flags
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} value(s) could not be read and were substituted (costs: {}, budgets: {}, purchased flags: {})",
            self.total(),
            self.invalid_costs,
            self.invalid_budgets,
            self.invalid_flags
        )
    }
}
