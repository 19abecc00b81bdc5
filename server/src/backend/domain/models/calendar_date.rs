//! Calendar dates in `YYYY-MM-DD` form.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `YYYY-MM-DD` date.
///
/// Ordering compares (year, month, day) numerically. There is no calendar
/// awareness: `2023-02-30` is accepted as long as it has the right shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: u32,
    month: u32,
    day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date `{0}`: expected YYYY-MM-DD")]
pub struct InvalidDate(pub String);

impl CalendarDate {
    pub fn new(year: u32, month: u32, day: u32) -> Result<Self, InvalidDate> {
        if year > 9999 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day)));
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

fn digits(part: &str, len: usize) -> Option<u32> {
    if part.len() != len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for CalendarDate {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidDate(s.to_string());
        let mut parts = s.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let year = digits(year, 4).ok_or_else(invalid)?;
        let month = digits(month, 2).ok_or_else(invalid)?;
        let day = digits(day, 2).ok_or_else(invalid)?;
        Self::new(year, month, day).map_err(|_| invalid())
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = InvalidDate;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> String {
        date.to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
