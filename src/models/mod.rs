mod categories;
mod draft;
mod errors;
mod record;
mod transaction;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use categories::{categories_for, is_catalog_category, CATALOG, UNCATEGORIZED};
pub use draft::{Owner, TransactionDraft};
pub use errors::{RecordError, ValidationError};
pub use record::{CsvRecord, TransactionRecord};
pub use transaction::{parse_transaction_date, Transaction};

/// Direction of a transaction; decides which side of every aggregate it lands on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => formatter.write_str("Income"),
            TransactionType::Expense => formatter.write_str("Expense")
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(format!("Unrecognized transaction type '{value}'"))
        }
    }
}
