//! Error taxonomy shared by every layer of the ledger.
use shared::{ErrorCode, ErrorDetail, ErrorResponse};

use super::models::Cents;

/// Errors are returned as values; nothing in the core panics on user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Caller-supplied data is missing or malformed
    #[error("{0}")]
    BadRequest(String),
    /// The referenced account or act does not exist
    #[error("{0}")]
    NotFound(String),
    /// The storage layer failed
    #[error("database error: {0}")]
    Db(String),
    /// Anything unexpected
    #[error("internal error: {0}")]
    Internal(String),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        LedgerError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        LedgerError::NotFound(message.into())
    }

    /// Posting `amount` would take the balance past what an `i64` of cents holds
    pub fn balance_out_of_range(account_id: &str, amount: Cents) -> Self {
        LedgerError::BadRequest(format!(
            "amount {} would overflow the balance of account {}",
            amount, account_id
        ))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::BadRequest(_) => ErrorCode::BadReq,
            LedgerError::NotFound(_) => ErrorCode::NotFound,
            LedgerError::Db(_) => ErrorCode::Db,
            LedgerError::Internal(_) => ErrorCode::Internal,
        }
    }

    pub fn to_detail(&self) -> ErrorDetail {
        ErrorDetail::new(self.to_string(), self.code())
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        LedgerError::Db(err.to_string())
    }
}

impl From<LedgerError> for ErrorResponse {
    fn from(err: LedgerError) -> Self {
        ErrorResponse {
            status: None,
            errors: vec![err.to_detail()],
        }
    }
}
