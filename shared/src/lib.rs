use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of results returned by list endpoints when no `count` is given
pub const DEFAULT_COUNT: usize = 5;

/// Account summary as seen by API consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub id: String,
    /// Opaque identifier of the external account holder
    pub holder_id: String,
    /// Current balance in currency units (cents / 100)
    pub balance: f64,
}

/// A single transaction ("act") posted to an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Act {
    pub id: String,
    /// Amount in currency units (positive for deposits, negative for withdrawals)
    pub amount: f64,
    /// YYYY-MM-DD
    pub date: String,
    pub memo: String,
}

/// A statement line: an act annotated with the balance right after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    pub id: String,
    pub amount: f64,
    pub date: String,
    pub memo: String,
    /// Running balance after this act, counting every earlier act
    pub balance: f64,
}

// ==================== Request parameters ====================
//
// Every scalar arrives as a string and is validated by the server.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccountParams {
    pub holder_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountParams {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAccountsParams {
    pub id: Option<String>,
    pub holder_id: Option<String>,
    pub count: Option<String>,
    pub index: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActParams {
    /// Account the act is posted to
    pub id: Option<String>,
    /// Amount string such as "12.34" or "-0.50"
    pub amount: Option<String>,
    pub date: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub id: Option<String>,
    pub act_id: Option<String>,
    pub date: Option<String>,
    pub memo_text: Option<String>,
    pub count: Option<String>,
    pub index: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementParams {
    pub id: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

// ==================== Errors ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadReq,
    NotFound,
    Db,
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::BadReq => "BAD_REQ",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Db => "DB",
            ErrorCode::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorOptions {
    pub code: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ErrorOptions>,
}

impl ErrorDetail {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            options: Some(ErrorOptions { code }),
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.options.as_ref().map(|options| options.code)
    }
}

/// Error envelope: `{ status?, errors: [{ message, options?: { code } }] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status, filled in by the REST layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub errors: Vec<ErrorDetail>,
}

// ==================== HATEOAS envelopes ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub name: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: &str, href: impl Into<String>) -> Self {
        Self {
            rel: rel.to_string(),
            name: rel.to_string(),
            href: href.into(),
        }
    }
}

/// A result wrapped with its navigation links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Linked<T> {
    pub result: T,
    pub links: Vec<Link>,
}

/// A page of results, each wrapped in a self link, plus self/next/prev links
pub type PagedResponse<T> = Linked<Vec<Linked<T>>>;
