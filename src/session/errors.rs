use crate::models::ValidationError;
use crate::storage::StoreError;
use crate::types::TransactionId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot {action} while the session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str
    },
    #[error("Transaction [{0}] is not in the current collection")]
    NotFound(TransactionId),
    #[error("Draft is invalid: {0}")]
    Validation(#[from] ValidationError),
    #[error("Saving failed: {0}")]
    Store(#[from] StoreError)
}
