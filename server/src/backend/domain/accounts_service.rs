//! Account service facade for the ledger.
//!
//! Every operation takes one flat, string-typed parameter object from the
//! `shared` crate, validates it into a typed command, delegates to the
//! configured storage backend and maps the outcome into wire DTOs.
use crate::backend::{
    domain::{
        commands::{
            accounts::AccountSearchQuery,
            acts::{ActQuery, PostActCommand, StatementRange},
            Window,
        },
        errors::LedgerResult,
        validation::{
            optional, parse_amount_to_cents, parse_date, parse_optional_date, parse_optional_int, required,
        },
    },
    io::rest::mappers::{account_mapper::AccountMapper, act_mapper::ActMapper},
    storage::{AccountStorage, Connection},
};
use log::{error, info};
use shared::{
    AccountInfo, AccountParams, Act as SharedAct, NewAccountParams, NewActParams, QueryParams,
    SearchAccountsParams, StatementLine, StatementParams, DEFAULT_COUNT,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AccountsService<C: Connection> {
    account_repository: C::AccountRepository,
}

fn window(count: Option<&str>, index: Option<&str>) -> LedgerResult<Window> {
    Ok(Window {
        count: parse_optional_int("count", count, DEFAULT_COUNT)?,
        index: parse_optional_int("index", index, 0)?,
    })
}

fn owned(value: Option<&str>) -> Option<String> {
    optional(value).map(str::to_string)
}

impl<C: Connection> AccountsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let account_repository = connection.create_account_repository();
        Self { account_repository }
    }

    /// Create an account for `holderId` and return its ID
    pub async fn new_account(&self, params: NewAccountParams) -> LedgerResult<String> {
        let holder_id = required("holderId", params.holder_id.as_deref())?;
        self.account_repository.new_account(holder_id).await
    }

    pub async fn info(&self, params: AccountParams) -> LedgerResult<AccountInfo> {
        let id = required("id", params.id.as_deref())?;
        let account = self.account_repository.info(id).await?;
        Ok(AccountMapper::to_dto(account))
    }

    /// Accounts in creation order, filtered by exact `id`/`holderId`
    pub async fn search_accounts(&self, params: SearchAccountsParams) -> LedgerResult<Vec<AccountInfo>> {
        let query = AccountSearchQuery {
            id: owned(params.id.as_deref()),
            holder_id: owned(params.holder_id.as_deref()),
            window: window(params.count.as_deref(), params.index.as_deref())?,
        };
        let accounts = self.account_repository.search_accounts(&query).await?;
        Ok(accounts.into_iter().map(AccountMapper::to_dto).collect())
    }

    /// Post an act to an account and return the new act ID.
    ///
    /// Every field is validated before storage is touched, so a malformed
    /// request never changes the balance.
    pub async fn new_act(&self, params: NewActParams) -> LedgerResult<String> {
        let command = PostActCommand {
            account_id: required("id", params.id.as_deref())?.to_string(),
            amount: parse_amount_to_cents("amount", required("amount", params.amount.as_deref())?)?,
            date: parse_date("date", required("date", params.date.as_deref())?)?,
            memo: required("memo", params.memo.as_deref())?.to_string(),
        };
        let act_id = self.account_repository.new_act(&command).await.map_err(|e| {
            error!("Failed to post act to account {}: {}", command.account_id, e);
            e
        })?;
        info!("Posted act {} to account {}", act_id, command.account_id);
        Ok(act_id)
    }

    /// Matching acts in chronological order. `count` is honored as given.
    pub async fn query(&self, params: QueryParams) -> LedgerResult<Vec<SharedAct>> {
        let account_id = required("id", params.id.as_deref())?;
        let query = ActQuery {
            act_id: owned(params.act_id.as_deref()),
            date: parse_optional_date("date", params.date.as_deref())?,
            memo_text: owned(params.memo_text.as_deref()),
            window: window(params.count.as_deref(), params.index.as_deref())?,
        };
        let acts = self.account_repository.query(account_id, &query).await?;
        Ok(acts.into_iter().map(ActMapper::to_dto).collect())
    }

    pub async fn statement(&self, params: StatementParams) -> LedgerResult<Vec<StatementLine>> {
        let account_id = required("id", params.id.as_deref())?;
        let range = StatementRange {
            from_date: parse_optional_date("fromDate", params.from_date.as_deref())?,
            to_date: parse_optional_date("toDate", params.to_date.as_deref())?,
        };
        let lines = self.account_repository.statement(account_id, &range).await?;
        Ok(lines.into_iter().map(ActMapper::to_statement_line).collect())
    }

    /// Remove every account and act from the backing store
    pub async fn clear(&self) -> LedgerResult<()> {
        self.account_repository.clear().await
    }
}
