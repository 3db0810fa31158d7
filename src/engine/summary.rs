use crate::models::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline numbers of a dashboard or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Always `total_income - total_expense`.
    pub balance: Decimal
}

pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => total_income += transaction.amount,
            TransactionType::Expense => total_expense += transaction.amount
        }
    }

    Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense
    }
}
