use async_trait::async_trait;
use log::{debug, info};
use sqlx::{QueryBuilder, Sqlite};

use crate::backend::domain::{
    commands::{
        accounts::AccountSearchQuery,
        acts::{ActQuery, PostActCommand, StatementRange},
    },
    errors::{LedgerError, LedgerResult},
    ledger,
    models::{generate_id, Account, Act, Cents, StatementEntry},
};
use crate::backend::storage::traits::AccountStorage;

use super::connection::DbConnection;
use super::documents::{AccountDocument, ActDocument};

const ACCOUNTS_COUNTER: &str = "accounts";
const ACTS_COUNTER: &str = "acts";

// SQLite silently turns an overflowing integer sum into a REAL, so the
// increment only applies when the result stays within i64
const GUARDED_BALANCE_UPDATE: &str = r#"
    UPDATE accounts SET balance = balance + ?
    WHERE id = ?
      AND CASE WHEN ? >= 0
          THEN balance <= 9223372036854775807 - ?
          ELSE balance >= (-9223372036854775807 - 1) - ?
      END
"#;

/// SQLite-backed account repository
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Atomically bump the named counter and return its new value
    async fn next_sequence(&self, counter: &str) -> LedgerResult<u64> {
        let val: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO counter (id, val) VALUES (?, 1)
            ON CONFLICT(id) DO UPDATE SET val = val + 1
            RETURNING val
            "#,
        )
        .bind(counter)
        .fetch_one(self.db.pool())
        .await?;
        u64::try_from(val).map_err(|_| LedgerError::Db(format!("counter {} is negative", counter)))
    }

    async fn find_account(&self, account_id: &str) -> LedgerResult<AccountDocument> {
        sqlx::query_as::<_, AccountDocument>(
            r#"
            SELECT id, holder_id, balance
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(account_id)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or_else(|| LedgerError::not_found(format!("cannot find account {}", account_id)))
    }

    /// Acts of an existing account in posting order, optionally narrowed by
    /// the exact-match filters of `query`
    async fn acts_of(&self, account_id: &str, query: Option<&ActQuery>) -> LedgerResult<Vec<Act>> {
        self.find_account(account_id).await?;

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, account_id, amount, date, memo FROM transactions WHERE account_id = ");
        builder.push_bind(account_id);
        if let Some(query) = query {
            if let Some(act_id) = &query.act_id {
                builder.push(" AND id = ").push_bind(act_id.as_str());
            }
            if let Some(date) = query.date {
                builder.push(" AND date = ").push_bind(date.to_string());
            }
        }
        builder.push(" ORDER BY ROWID");

        let docs = builder
            .build_query_as::<ActDocument>()
            .fetch_all(self.db.pool())
            .await?;
        docs.into_iter().map(Act::try_from).collect()
    }
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn new_account(&self, holder_id: &str) -> LedgerResult<String> {
        let id = generate_id(self.next_sequence(ACCOUNTS_COUNTER).await?);
        sqlx::query(
            r#"
            INSERT INTO accounts (id, holder_id, balance)
            VALUES (?, ?, 0)
            "#,
        )
        .bind(&id)
        .bind(holder_id)
        .execute(self.db.pool())
        .await?;
        info!("Created account {} for holder {}", id, holder_id);
        Ok(id)
    }

    async fn info(&self, account_id: &str) -> LedgerResult<Account> {
        Ok(self.find_account(account_id).await?.into())
    }

    async fn search_accounts(&self, query: &AccountSearchQuery) -> LedgerResult<Vec<Account>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, holder_id, balance FROM accounts WHERE 1 = 1");
        if let Some(id) = &query.id {
            builder.push(" AND id = ").push_bind(id.as_str());
        }
        if let Some(holder_id) = &query.holder_id {
            builder.push(" AND holder_id = ").push_bind(holder_id.as_str());
        }
        builder.push(" ORDER BY ROWID");

        let docs = builder
            .build_query_as::<AccountDocument>()
            .fetch_all(self.db.pool())
            .await?;
        Ok(ledger::select_accounts(docs.into_iter().map(Account::from), query))
    }

    async fn new_act(&self, command: &PostActCommand) -> LedgerResult<String> {
        let account = self.find_account(&command.account_id).await?;
        let out_of_range = || LedgerError::balance_out_of_range(&command.account_id, command.amount);
        Cents(account.balance).checked_add(command.amount).ok_or_else(out_of_range)?;
        let act_id = generate_id(self.next_sequence(ACTS_COUNTER).await?);

        // The act and the balance increment commit together or not at all
        let mut tx = self.db.pool().begin().await?;
        sqlx::query(
            r#"
            INSERT INTO transactions (id, account_id, amount, date, memo)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&act_id)
        .bind(&command.account_id)
        .bind(command.amount.value())
        .bind(command.date.to_string())
        .bind(&command.memo)
        .execute(&mut *tx)
        .await?;

        let amount = command.amount.value();
        let updated = sqlx::query(GUARDED_BALANCE_UPDATE)
            .bind(amount)
            .bind(&command.account_id)
            .bind(amount)
            .bind(amount)
            .bind(amount)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() != 1 {
            tx.rollback().await?;
            // Either the account vanished or a concurrent post moved its
            // balance too close to the edge since the check above
            self.find_account(&command.account_id).await?;
            return Err(out_of_range());
        }
        tx.commit().await?;

        debug!(
            "Posted act {} of {} to account {}",
            act_id, command.amount, command.account_id
        );
        Ok(act_id)
    }

    async fn query(&self, account_id: &str, query: &ActQuery) -> LedgerResult<Vec<Act>> {
        let acts = self.acts_of(account_id, Some(query)).await?;
        Ok(ledger::select_acts(acts, query))
    }

    async fn statement(&self, account_id: &str, range: &StatementRange) -> LedgerResult<Vec<StatementEntry>> {
        // Acts before the range still feed the running balance, so load them all
        let acts = self.acts_of(account_id, None).await?;
        ledger::statement(acts, range)
    }

    async fn clear(&self) -> LedgerResult<()> {
        let mut tx = self.db.pool().begin().await?;
        sqlx::query("DELETE FROM transactions").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM accounts").execute(&mut *tx).await?;
        tx.commit().await?;
        info!("Cleared stored accounts and acts");
        Ok(())
    }
}
