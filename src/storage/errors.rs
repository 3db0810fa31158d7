use crate::models::ValidationError;
use crate::types::TransactionId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Transaction [{0}] was not found")]
    NotFound(TransactionId),
    #[error("Transaction was rejected: {0}")]
    Rejected(#[from] ValidationError),
    #[error("Transaction store is unavailable: {0}")]
    Unavailable(String)
}
