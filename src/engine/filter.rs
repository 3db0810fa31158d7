use crate::engine::errors::FilterError;
use crate::models::Transaction;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use std::convert::Infallible;
use std::str::FromStr;
use tracing::debug;

/// Month counts a report can look back over.
pub const SUPPORTED_WINDOWS: [u32; 4] = [1, 3, 6, 12];

/// How far back a view looks, counted in whole calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    All,
    LastMonths(u32)
}

impl TimeWindow {
    pub fn last_months(months: u32) -> Result<Self, FilterError> {
        if SUPPORTED_WINDOWS.contains(&months) {
            Ok(TimeWindow::LastMonths(months))
        } else {
            Err(FilterError::UnsupportedWindow(months))
        }
    }

    /// First instant included by the window: midnight on the first day of
    /// `today`'s month, moved back by the window length.
    ///
    /// `None` for [`TimeWindow::All`].
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDateTime> {
        match self {
            TimeWindow::All => None,
            TimeWindow::LastMonths(months) => today.with_day(1)
                .and_then(|first| first.checked_sub_months(Months::new(*months)))
                .and_then(|start| start.and_hms_opt(0, 0, 0))
        }
    }
}

impl FromStr for TimeWindow {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.eq_ignore_ascii_case("all") {
            return Ok(TimeWindow::All);
        }

        let months: u32 = value.parse().map_err(|_| FilterError::InvalidWindow(value.to_string()))?;
        TimeWindow::last_months(months)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Case-sensitive exact match on the category label.
    Exact(String)
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(expected) => expected == category
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Exact(value.to_string()))
        }
    }
}

/// Narrows `transactions` to those inside the time window and category.
///
/// Input order is preserved. With a window set, undated transactions are excluded.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    time_window: &TimeWindow,
    category_filter: &CategoryFilter,
    today: NaiveDate
) -> Vec<&'a Transaction> {
    let cutoff = time_window.cutoff(today);
    let windowed = *time_window != TimeWindow::All;

    let filtered: Vec<&Transaction> = transactions.iter()
        .filter(|transaction| {
            let in_window = match (windowed, cutoff, transaction.date) {
                (false, _, _) => true,
                (true, Some(cutoff), Some(date)) => date >= cutoff,
                (true, _, _) => false
            };

            in_window && category_filter.matches(&transaction.category)
        })
        .collect();

    debug!("Filtered {} of {} transactions with {:?} / {:?}", filtered.len(), transactions.len(), time_window, category_filter);

    filtered
}
