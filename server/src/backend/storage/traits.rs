//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use async_trait::async_trait;

use crate::backend::domain::{
    commands::{
        accounts::AccountSearchQuery,
        acts::{ActQuery, PostActCommand, StatementRange},
    },
    errors::LedgerResult,
    models::{Account, Act, StatementEntry},
};

/// Trait defining the account and act operations every backend provides
///
/// Parameters arrive already validated and typed. Every operation that names
/// an account fails with `NOT_FOUND` when the account does not exist.
/// Implementations hand their raw data to `domain::ledger` so that all
/// backends agree on ordering, filtering, windowing and balances.
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Create a zero-balance account and return its ID
    async fn new_account(&self, holder_id: &str) -> LedgerResult<String>;

    /// Retrieve an account header
    async fn info(&self, account_id: &str) -> LedgerResult<Account>;

    /// List accounts in creation order matching the query window
    async fn search_accounts(&self, query: &AccountSearchQuery) -> LedgerResult<Vec<Account>>;

    /// Append an act and adjust the account balance by its amount; returns the act ID
    async fn new_act(&self, command: &PostActCommand) -> LedgerResult<String>;

    /// Acts matching the query, in chronological order, windowed
    async fn query(&self, account_id: &str, query: &ActQuery) -> LedgerResult<Vec<Act>>;

    /// Statement lines with running balances for acts inside the range
    async fn statement(&self, account_id: &str, range: &StatementRange) -> LedgerResult<Vec<StatementEntry>>;

    /// Delete every account and act. ID sequences are not reset.
    async fn clear(&self) -> LedgerResult<()>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type (in-memory, SQLite)
/// and provides factory methods for creating repositories. This allows the
/// domain layer to work with any storage backend without knowing the
/// implementation details.
pub trait Connection: Send + Sync + Clone + 'static {
    /// The type of AccountStorage this connection creates
    type AccountRepository: AccountStorage + Clone + 'static;

    /// Create a new account repository for this connection
    fn create_account_repository(&self) -> Self::AccountRepository;
}
