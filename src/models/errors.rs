use crate::models::TransactionType;
use crate::types::TransactionId;
use rust_decimal::Decimal;
use thiserror::Error;

/// A wire record that cannot become a [`Transaction`](crate::models::Transaction) at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record has no id")]
    MissingId,
    #[error("Record [{id}] has no type")]
    MissingType {
        id: TransactionId
    },
    #[error("Record [{id}] has unrecognized type '{value}'")]
    UnknownType {
        id: TransactionId,
        value: String
    }
}

/// A create or edit payload that the store must refuse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("Category is required")]
    MissingCategory,
    #[error("Category '{category}' cannot be used for {transaction_type} transactions")]
    CategoryNotAllowed {
        category: String,
        transaction_type: TransactionType
    },
    #[error("Date is required")]
    MissingDate
}
