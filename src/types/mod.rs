mod amount;
mod errors;
mod month;

pub use amount::{format_amount, parse_amount};
pub use errors::{AmountError, MonthKeyError};
pub use month::MonthKey;

pub type TransactionId = String;
pub type OwnerId = String;
