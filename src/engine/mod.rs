//! The aggregation engine: pure, synchronous transformations from a
//! transaction snapshot into the derived views shown on dashboards and reports.
//!
//! Nothing here mutates its input or performs I/O, so every function can be
//! re-run in full whenever the collection or the active filters change.

mod category;
mod errors;
mod filter;
mod monthly;
mod report;
mod summary;
#[cfg(test)]
mod tests;

pub use category::{aggregate_by_category, categories_present, CategoryTotal, CategoryTotals, TypeRestriction};
pub use errors::FilterError;
pub use filter::{filter_transactions, CategoryFilter, TimeWindow, SUPPORTED_WINDOWS};
pub use monthly::{aggregate_by_month, fill_month_gaps, running_balance, BalancePoint, MonthlyTotals};
pub use report::{build_report, Report, ReportQuery};
pub use summary::{summarize, Summary};
