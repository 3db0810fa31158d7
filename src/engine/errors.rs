use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Time window of {0} months is not supported (expected 1, 3, 6 or 12)")]
    UnsupportedWindow(u32),
    #[error("Time window '{0}' is neither 'all' nor a number of months")]
    InvalidWindow(String),
    #[error("Type restriction '{0}' is not one of 'any', 'income' or 'expense'")]
    InvalidRestriction(String)
}
