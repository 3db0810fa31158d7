use crate::engine::{
    aggregate_by_category, aggregate_by_month, categories_present, fill_month_gaps, filter_transactions,
    running_balance, summarize, BalancePoint, CategoryFilter, CategoryTotals, MonthlyTotals, Summary, TimeWindow,
    TypeRestriction,
};
use crate::models::Transaction;
use chrono::NaiveDate;
use serde::Serialize;

/// The user's current view selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub time_window: TimeWindow,
    pub category_filter: CategoryFilter,
    /// Types counted by the category breakdown.
    pub type_restriction: TypeRestriction,
    /// Zero-fill months without activity in the monthly series.
    pub fill_gaps: bool
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            time_window: TimeWindow::All,
            category_filter: CategoryFilter::All,
            type_restriction: TypeRestriction::OnlyExpense,
            fill_gaps: false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: Summary,
    pub categories: CategoryTotals,
    pub monthly: Vec<MonthlyTotals>,
    pub running_balance: Vec<BalancePoint>,
    /// Every category in the unfiltered collection, for the category picker.
    pub available_categories: Vec<String>,
    /// Number of transactions that passed the filters.
    pub matched: usize
}

/// Runs the full pipeline: filter, then every aggregate over the filtered set.
pub fn build_report(transactions: &[Transaction], query: &ReportQuery, today: NaiveDate) -> Report {
    let filtered = filter_transactions(transactions, &query.time_window, &query.category_filter, today);

    let mut monthly = aggregate_by_month(filtered.iter().copied());

    if query.fill_gaps {
        monthly = fill_month_gaps(&monthly);
    }

    Report {
        summary: summarize(filtered.iter().copied()),
        categories: aggregate_by_category(filtered.iter().copied(), query.type_restriction),
        running_balance: running_balance(&monthly),
        monthly,
        available_categories: categories_present(transactions),
        matched: filtered.len()
    }
}
