use crate::types::errors::AmountError;
use rust_decimal::{Decimal, RoundingStrategy};

const MAX_DECIMAL_PLACES: u32 = 8;
const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Parses a user supplied amount such as `"1000"`, `"12.5"` or `"-0.01"` into an exact decimal.
///
/// Leading and trailing whitespace is ignored. A leading `.` (`".5"`) is rejected, a trailing one (`"1."`) is not.
pub fn parse_amount(value: &str) -> Result<Decimal, AmountError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AmountError::InvalidFormat("Value is an empty string".to_string()));
    }

    let unsigned = value.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(value);

    if !unsigned.starts_with(|c: char| c.is_ascii_digit()) || !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(AmountError::InvalidFormat(format!("Value '{value}' is not a plain decimal number")));
    }

    let amount = Decimal::from_str_exact(value)?;

    if amount.scale() > MAX_DECIMAL_PLACES {
        return Err(AmountError::TooManyDecimalPlaces(amount.scale()));
    }

    Ok(amount)
}

/// Renders an amount with two decimal places, rounding midpoints away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
