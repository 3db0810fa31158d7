use crate::models::{Transaction, TransactionType};
use crate::types::MonthKey;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Income and expense accumulated over one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub month: MonthKey,
    pub income_total: Decimal,
    pub expense_total: Decimal
}

impl MonthlyTotals {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            income_total: Decimal::ZERO,
            expense_total: Decimal::ZERO
        }
    }

    pub fn net(&self) -> Decimal {
        self.income_total - self.expense_total
    }

    fn add(&mut self, transaction: &Transaction) {
        match transaction.transaction_type {
            TransactionType::Income => self.income_total += transaction.amount,
            TransactionType::Expense => self.expense_total += transaction.amount
        }
    }
}

/// Cumulative net position at the end of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    pub month: MonthKey,
    pub net: Decimal,
    pub balance: Decimal
}

/// Buckets transactions by calendar month, one entry per month that has
/// activity, ascending. Undated transactions are skipped.
pub fn aggregate_by_month<'a, I>(transactions: I) -> Vec<MonthlyTotals>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets = BTreeMap::<MonthKey, MonthlyTotals>::new();

    for transaction in transactions {
        let Some(month) = transaction.month() else {
            debug!("Transaction [{}] has no date and is left out of the monthly series", transaction.id);
            continue
        };

        buckets.entry(month)
            .or_insert_with(|| MonthlyTotals::empty(month))
            .add(transaction);
    }

    buckets.into_values().collect()
}

/// Inserts zero rows for months missing between the first and last entry.
///
/// Expects the ascending series produced by [`aggregate_by_month`].
pub fn fill_month_gaps(series: &[MonthlyTotals]) -> Vec<MonthlyTotals> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Vec::new()
    };

    let mut filled = Vec::with_capacity(series.len());
    let mut existing = series.iter().peekable();
    let mut month = first.month;

    while month <= last.month {
        match existing.next_if(|totals| totals.month == month) {
            Some(totals) => filled.push(*totals),
            None => filled.push(MonthlyTotals::empty(month))
        }

        month = month.next();
    }

    filled
}

/// Running balance across a monthly series, starting from zero.
pub fn running_balance(series: &[MonthlyTotals]) -> Vec<BalancePoint> {
    let mut balance = Decimal::ZERO;

    series.iter()
        .map(|totals| {
            let net = totals.net();
            balance += net;

            BalancePoint { month: totals.month, net, balance }
        })
        .collect()
}
