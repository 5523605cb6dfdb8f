//! Budget aggregates and per-recipient grouped reporting.

use rust_decimal::Decimal;

use gift_domain::{
    sub_amounts, sum_amounts, BudgetTotals, GiftRecord, Ledger, RecipientSummary, SeriesPoint,
    WaterfallSeries, REMAINING_LABEL,
};

/// Aggregates ledger data for the metrics panel, grouped view and charts.
///
/// See also: [`gift_domain::RecipientSummary`] for the grouped data model.
pub struct SummaryService;

impl SummaryService {
    /// Sum of every record's budget.
    pub fn total_budget(ledger: &Ledger) -> Decimal {
        sum_amounts(ledger.iter().map(|record| record.budget))
    }

    /// Sum of known costs over purchased records.
    pub fn total_spent(ledger: &Ledger) -> Decimal {
        sum_amounts(ledger.iter().map(GiftRecord::spent))
    }

    /// `total_budget - total_spent`. Not clamped at zero.
    pub fn remaining(ledger: &Ledger) -> Decimal {
        sub_amounts(Self::total_budget(ledger), Self::total_spent(ledger))
    }

    pub fn budget_totals(ledger: &Ledger) -> BudgetTotals {
        let total_budget = Self::total_budget(ledger);
        let total_spent = Self::total_spent(ledger);
        BudgetTotals {
            total_budget,
            total_spent,
            remaining: sub_amounts(total_budget, total_spent),
            record_count: ledger.len(),
            purchased_count: ledger.iter().filter(|record| record.purchased).count(),
        }
    }

    /// Groups records by recipient in order of first appearance.
    ///
    /// Items within a group are sorted by cost descending; ties and unknown costs keep
    /// their insertion order, with unknown costs placed last.
    pub fn group_by_recipient(ledger: &Ledger, fixed_budget: Decimal) -> Vec<RecipientSummary> {
        let mut groups: Vec<(String, Vec<GiftRecord>)> = Vec::new();
        for record in ledger {
            match groups
                .iter_mut()
                .find(|(recipient, _)| *recipient == record.recipient)
            {
                Some((_, items)) => items.push(record.clone()),
                None => groups.push((record.recipient.clone(), vec![record.clone()])),
            }
        }

        groups
            .into_iter()
            .map(|(recipient, mut items)| {
                items.sort_by(|a, b| b.cost.cmp(&a.cost));
                let allotted_budget = sum_amounts(items.iter().map(|item| item.budget));
                let total_purchased_cost = sum_amounts(items.iter().map(GiftRecord::spent));
                RecipientSummary {
                    recipient,
                    items,
                    allotted_budget,
                    total_purchased_cost,
                    remaining_budget: sub_amounts(fixed_budget, total_purchased_cost),
                }
            })
            .collect()
    }

    /// Finds one recipient's group by exact name.
    pub fn find_group<'a>(
        groups: &'a [RecipientSummary],
        recipient: &str,
    ) -> Option<&'a RecipientSummary> {
        groups.iter().find(|group| group.recipient == recipient)
    }

    /// Purchased items with known costs, then a `Remaining` point against `fixed_budget`.
    ///
    /// Returns `None` when the recipient has nothing purchased to chart.
    pub fn waterfall_series(
        summary: &RecipientSummary,
        fixed_budget: Decimal,
    ) -> Option<WaterfallSeries> {
        let mut points: Vec<SeriesPoint> = summary
            .purchased_items()
            .filter_map(|item| item.cost.map(|cost| SeriesPoint::new(item.gift.clone(), cost)))
            .collect();
        if points.is_empty() {
            return None;
        }
        let spent = sum_amounts(points.iter().map(|point| point.value));
        points.push(SeriesPoint::new(REMAINING_LABEL, sub_amounts(fixed_budget, spent)));
        Some(WaterfallSeries {
            recipient: summary.recipient.clone(),
            points,
        })
    }

    /// Series for every recipient that has one, in group order.
    pub fn waterfall_report(ledger: &Ledger, fixed_budget: Decimal) -> Vec<WaterfallSeries> {
        Self::group_by_recipient(ledger, fixed_budget)
            .iter()
            .filter_map(|summary| Self::waterfall_series(summary, fixed_budget))
            .collect()
    }
}
