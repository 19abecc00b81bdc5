//! Domain model for accounts and the in-memory account collection.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Act, CalendarDate, Cents, IdSequence};
use crate::backend::domain::errors::{LedgerError, LedgerResult};

/// Account header: identity, holder and current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub holder_id: String,
    pub balance: Cents,
}

/// An account together with the acts it owns, in posting order.
///
/// The balance is only ever changed by [`AccountLedger::post`], so it always
/// equals the sum of the owned acts.
#[derive(Debug, Clone)]
pub struct AccountLedger {
    account: Account,
    acts: Vec<Act>,
}

impl AccountLedger {
    pub fn new(id: String, holder_id: String) -> Self {
        Self {
            account: Account {
                id,
                holder_id,
                balance: Cents::ZERO,
            },
            acts: Vec::new(),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Acts in the order they were posted.
    pub fn acts(&self) -> &[Act] {
        &self.acts
    }

    /// Balance after posting `amount`, or an error if it does not fit.
    pub fn balance_after(&self, amount: Cents) -> LedgerResult<Cents> {
        self.account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::balance_out_of_range(&self.account.id, amount))
    }

    /// Append a new act and adjust the balance by its amount. Nothing changes
    /// when the new balance would overflow.
    pub fn post(&mut self, act_id: String, amount: Cents, date: CalendarDate, memo: String) -> LedgerResult<&Act> {
        self.account.balance = self.balance_after(amount)?;
        self.acts.push(Act {
            id: act_id,
            account_id: self.account.id.clone(),
            amount,
            date,
            memo,
        });
        Ok(&self.acts[self.acts.len() - 1])
    }
}

/// Collection of accounts keyed by generated ID, kept in creation order.
#[derive(Debug, Default)]
pub struct Accounts {
    ledgers: Vec<AccountLedger>,
    positions: HashMap<String, usize>,
    account_ids: IdSequence,
    act_ids: IdSequence,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty, zero-balance account and return its ID.
    pub fn create(&mut self, holder_id: &str) -> String {
        let id = self.account_ids.next_id();
        self.positions.insert(id.clone(), self.ledgers.len());
        self.ledgers.push(AccountLedger::new(id.clone(), holder_id.to_string()));
        id
    }

    pub fn get(&self, id: &str) -> Option<&AccountLedger> {
        self.positions.get(id).map(|&pos| &self.ledgers[pos])
    }

    /// Post an act to an existing account, minting its ID from the act
    /// sequence (independent of account IDs). A rejected post does not
    /// consume an act ID.
    pub fn post_act(
        &mut self,
        account_id: &str,
        amount: Cents,
        date: CalendarDate,
        memo: String,
    ) -> LedgerResult<&Act> {
        let pos = *self
            .positions
            .get(account_id)
            .ok_or_else(|| LedgerError::not_found(format!("cannot find account {}", account_id)))?;
        let ledger = &mut self.ledgers[pos];
        ledger.balance_after(amount)?;
        let act_id = self.act_ids.next_id();
        ledger.post(act_id, amount, date, memo)
    }

    /// All accounts in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &AccountLedger> {
        self.ledgers.iter()
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    /// Drop every account and act. ID counters keep running so IDs are never reused.
    pub fn clear(&mut self) {
        self.ledgers.clear();
        self.positions.clear();
    }
}
