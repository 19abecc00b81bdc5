//! Query and statement algorithms shared by every storage backend.
//!
//! Backends only supply raw data: accounts in creation order and an account's
//! acts in posting order. Everything observable (filtering, chronological
//! ordering, windowing, running balances) is computed here, so the memory and
//! SQLite backends produce identical results for identical inputs.

use super::commands::{
    accounts::AccountSearchQuery,
    acts::{ActQuery, StatementRange},
    Window,
};
use super::errors::{LedgerError, LedgerResult};
use super::models::{Account, Act, CalendarDate, Cents, StatementEntry};

/// Sort acts by date. The sort is stable, so acts sharing a date keep their
/// posting order.
pub fn chronological(mut acts: Vec<Act>) -> Vec<Act> {
    acts.sort_by_key(|act| act.date);
    acts
}

/// Skip `index` items and return at most `count` of the rest.
pub fn window<T>(items: impl IntoIterator<Item = T>, window: Window) -> Vec<T> {
    items
        .into_iter()
        .skip(window.index)
        .take(window.count)
        .collect()
}

impl ActQuery {
    pub fn matches(&self, act: &Act) -> bool {
        self.act_id.as_ref().map_or(true, |id| act.id == *id)
            && self.date.map_or(true, |date| act.date == date)
            && self.memo_text.as_ref().map_or(true, |text| act.memo_contains(text))
    }
}

impl StatementRange {
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.from_date.map_or(true, |from| date >= from) && self.to_date.map_or(true, |to| date <= to)
    }
}

impl AccountSearchQuery {
    pub fn matches(&self, account: &Account) -> bool {
        self.id.as_ref().map_or(true, |id| account.id == *id)
            && self.holder_id.as_ref().map_or(true, |holder| account.holder_id == *holder)
    }
}

/// Filter acts (given in posting order), sort them chronologically, then window.
pub fn select_acts(acts: Vec<Act>, query: &ActQuery) -> Vec<Act> {
    let matching = acts.into_iter().filter(|act| query.matches(act)).collect();
    window(chronological(matching), query.window)
}

/// Walk every act in chronological order accumulating the balance from zero,
/// emitting a line only for acts dated inside `range`.
///
/// Acts outside the range still contribute to the balance of later lines.
/// Posting order keeps the final balance in range, but a chronological
/// reordering can pass through an intermediate balance that does not fit;
/// that is reported rather than wrapped.
pub fn statement(acts: Vec<Act>, range: &StatementRange) -> LedgerResult<Vec<StatementEntry>> {
    let mut balance = Cents::ZERO;
    let mut lines = Vec::new();
    for act in chronological(acts) {
        balance = balance
            .checked_add(act.amount)
            .ok_or_else(|| LedgerError::balance_out_of_range(&act.account_id, act.amount))?;
        if range.contains(act.date) {
            lines.push(StatementEntry { act, balance });
        }
    }
    Ok(lines)
}

/// Filter accounts (given in creation order) and window them.
pub fn select_accounts(accounts: impl IntoIterator<Item = Account>, query: &AccountSearchQuery) -> Vec<Account> {
    window(
        accounts.into_iter().filter(|account| query.matches(account)),
        query.window,
    )
}
