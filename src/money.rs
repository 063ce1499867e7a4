use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy, prelude::Zero};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("`{input}` is not a valid amount")]
    Malformed { input: String },
    #[error("Amount must be greater than zero")]
    NotPositive,
}

/// Parses a user supplied amount. Only strictly positive values are accepted.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountParseError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed).map_err(|_| AmountParseError::Malformed {
        input: trimmed.to_string(),
    })?;
    if amount <= Decimal::zero() {
        return Err(AmountParseError::NotPositive);
    }
    Ok(amount)
}

/// Balance formatting: always two fraction digits.
pub fn display_balance(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Formatting used inside transaction log entries: shortest form,
/// but never without a fraction part (`40` becomes `40.0`).
pub fn display_entry(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        format!("{normalized}.0")
    } else {
        normalized.to_string()
    }
}
