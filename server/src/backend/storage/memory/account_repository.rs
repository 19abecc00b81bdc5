use async_trait::async_trait;
use log::{debug, info};

use crate::backend::domain::{
    commands::{
        accounts::AccountSearchQuery,
        acts::{ActQuery, PostActCommand, StatementRange},
    },
    errors::{LedgerError, LedgerResult},
    ledger,
    models::{Account, AccountLedger, Accounts, Act, StatementEntry},
};
use crate::backend::storage::traits::AccountStorage;

use super::connection::MemoryConnection;

/// In-memory account repository
#[derive(Clone)]
pub struct AccountRepository {
    connection: MemoryConnection,
}

fn find<'a>(accounts: &'a Accounts, account_id: &str) -> LedgerResult<&'a AccountLedger> {
    accounts
        .get(account_id)
        .ok_or_else(|| LedgerError::not_found(format!("cannot find account {}", account_id)))
}

impl AccountRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }

    /// Snapshot of an account's acts in posting order
    fn acts_of(&self, account_id: &str) -> LedgerResult<Vec<Act>> {
        let accounts = self.connection.lock()?;
        Ok(find(&accounts, account_id)?.acts().to_vec())
    }
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn new_account(&self, holder_id: &str) -> LedgerResult<String> {
        let id = self.connection.lock()?.create(holder_id);
        info!("Created account {} for holder {}", id, holder_id);
        Ok(id)
    }

    async fn info(&self, account_id: &str) -> LedgerResult<Account> {
        let accounts = self.connection.lock()?;
        Ok(find(&accounts, account_id)?.account().clone())
    }

    async fn search_accounts(&self, query: &AccountSearchQuery) -> LedgerResult<Vec<Account>> {
        let accounts = self.connection.lock()?;
        let all = accounts.iter().map(|ledger| ledger.account().clone());
        Ok(ledger::select_accounts(all, query))
    }

    async fn new_act(&self, command: &PostActCommand) -> LedgerResult<String> {
        let mut accounts = self.connection.lock()?;
        let act_id = accounts
            .post_act(&command.account_id, command.amount, command.date, command.memo.clone())
            .map(|act| act.id.clone())?;
        debug!(
            "Posted act {} of {} to account {}",
            act_id, command.amount, command.account_id
        );
        Ok(act_id)
    }

    async fn query(&self, account_id: &str, query: &ActQuery) -> LedgerResult<Vec<Act>> {
        Ok(ledger::select_acts(self.acts_of(account_id)?, query))
    }

    async fn statement(&self, account_id: &str, range: &StatementRange) -> LedgerResult<Vec<StatementEntry>> {
        ledger::statement(self.acts_of(account_id)?, range)
    }

    async fn clear(&self) -> LedgerResult<()> {
        self.connection.lock()?.clear();
        info!("Cleared in-memory accounts and acts");
        Ok(())
    }
}
