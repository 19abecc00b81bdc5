//! Parsing and validation of the string-typed request parameters.
//!
//! Every function returns the parsed value or a `BAD_REQ` error; callers
//! propagate the first failure with `?`.

use super::errors::{LedgerError, LedgerResult};
use super::models::{CalendarDate, Cents};

/// Treat absent and empty parameters alike.
pub fn optional(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn required<'a>(name: &str, value: Option<&'a str>) -> LedgerResult<&'a str> {
    optional(value).ok_or_else(|| LedgerError::bad_request(format!("{} must be provided", name)))
}

/// Parse an amount such as `"12.34"` or `"-0.50"` into cents.
///
/// Exactly two digits must follow the decimal point and at least one must
/// precede it; an optional leading `-` marks a withdrawal.
pub fn parse_amount_to_cents(name: &str, value: &str) -> LedgerResult<Cents> {
    let invalid = || {
        LedgerError::bad_request(format!(
            "bad {} `{}`: expected a number with two decimals, like 12.34",
            name, value
        ))
    };
    let (negative, magnitude) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let (whole, fraction) = magnitude.split_once('.').ok_or_else(invalid)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || fraction.len() != 2 || !all_digits(fraction) {
        return Err(invalid());
    }
    let whole: i64 = whole.parse().map_err(|_| invalid())?;
    let fraction: i64 = fraction.parse().map_err(|_| invalid())?;
    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .ok_or_else(invalid)?;
    Ok(Cents(if negative { -cents } else { cents }))
}

pub fn parse_date(name: &str, value: &str) -> LedgerResult<CalendarDate> {
    value
        .parse()
        .map_err(|_| LedgerError::bad_request(format!("bad {} `{}`: expected YYYY-MM-DD", name, value)))
}

pub fn parse_non_negative_int(name: &str, value: &str) -> LedgerResult<usize> {
    let invalid =
        || LedgerError::bad_request(format!("bad {} `{}`: expected a non-negative integer", name, value));
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

pub fn parse_optional_date(name: &str, value: Option<&str>) -> LedgerResult<Option<CalendarDate>> {
    optional(value).map(|v| parse_date(name, v)).transpose()
}

pub fn parse_optional_int(name: &str, value: Option<&str>, default: usize) -> LedgerResult<usize> {
    match optional(value) {
        Some(v) => parse_non_negative_int(name, v),
        None => Ok(default),
    }
}
