// src/utils/precision.rs
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses an exchange decimal string such as `"0.00150000"`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}

/// `numerator / denominator`, or zero when the denominator is zero.
/// Example: ratio(10, 4) -> 2.5, ratio(10, 0) -> 0
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Share of `part` in `whole` as a percentage, zero for an empty whole.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    ratio(part, whole) * Decimal::ONE_HUNDRED
}
