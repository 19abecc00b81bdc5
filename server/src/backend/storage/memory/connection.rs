use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::domain::{
    errors::{LedgerError, LedgerResult},
    models::Accounts,
};
use crate::backend::storage::traits::Connection;

use super::account_repository::AccountRepository;

/// MemoryConnection shares one in-process account collection between repositories
#[derive(Clone, Default)]
pub struct MemoryConnection {
    accounts: Arc<Mutex<Accounts>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the account collection for the duration of one operation
    pub fn lock(&self) -> LedgerResult<MutexGuard<'_, Accounts>> {
        self.accounts
            .lock()
            .map_err(|_| LedgerError::Internal("account store lock poisoned".to_string()))
    }
}

impl Connection for MemoryConnection {
    type AccountRepository = AccountRepository;

    fn create_account_repository(&self) -> Self::AccountRepository {
        AccountRepository::new(self.clone())
    }
}
