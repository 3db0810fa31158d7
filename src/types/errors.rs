use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: {0}")]
    InvalidFormat(String),
    #[error("Amount error: {0}")]
    Decimal(#[from] rust_decimal::Error),
    #[error("Amount error: {0} decimal places exceeds the maximum of 8")]
    TooManyDecimalPlaces(u32)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonthKeyError {
    #[error("Month key '{0}' is not in YYYY-MM form")]
    InvalidFormat(String),
    #[error("Month key '{0}' has a month outside 01-12")]
    MonthOutOfRange(String)
}
