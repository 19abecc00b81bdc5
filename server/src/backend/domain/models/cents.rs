//! Integer money amounts.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A signed amount of money in cents.
///
/// All arithmetic happens on the integer value and is checked; conversion to
/// currency units only happens when a value leaves the core for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub fn value(self) -> i64 {
        self.0
    }

    /// `None` when the sum does not fit in an `i64`
    pub fn checked_add(self, rhs: Cents) -> Option<Cents> {
        self.0.checked_add(rhs.0).map(Cents)
    }

    /// Amount in currency units, e.g. `Cents(1009)` is `10.09`.
    pub fn to_units(self) -> f64 {
        self.0 as f64 / 100.0
    }
}


impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}
