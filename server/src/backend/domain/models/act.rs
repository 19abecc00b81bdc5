//! Domain model for a transaction ("act").
use serde::{Deserialize, Serialize};

use super::{CalendarDate, Cents};

/// An immutable transaction posted to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Act {
    pub id: String,
    pub account_id: String,
    /// Signed amount: `>= 0` is a deposit, `< 0` a withdrawal
    pub amount: Cents,
    pub date: CalendarDate,
    pub memo: String,
}

impl Act {
    /// Case-insensitive substring match against the memo.
    pub fn memo_contains(&self, text: &str) -> bool {
        self.memo.to_lowercase().contains(&text.to_lowercase())
    }
}

/// An act together with the account balance immediately after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementEntry {
    pub act: Act,
    pub balance: Cents,
}
