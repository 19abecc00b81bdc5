//! Translation of ledger errors into HTTP responses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::error;
use shared::{ErrorCode, ErrorDetail, ErrorResponse};

use crate::backend::domain::errors::LedgerError;

/// Error body plus the status derived from its codes
#[derive(Debug)]
pub struct ApiError {
    errors: Vec<ErrorDetail>,
}

fn status_of(code: Option<ErrorCode>) -> StatusCode {
    match code {
        Some(ErrorCode::NotFound) => StatusCode::NOT_FOUND,
        Some(ErrorCode::Db) | Some(ErrorCode::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
        Some(ErrorCode::BadReq) | None => StatusCode::BAD_REQUEST,
    }
}

impl ApiError {
    pub fn new(errors: Vec<ErrorDetail>) -> Self {
        Self { errors }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(vec![ErrorDetail::new(message, ErrorCode::NotFound)])
    }

    /// Status of the first error, unless any error maps to 500
    pub fn status(&self) -> StatusCode {
        let statuses: Vec<StatusCode> = self.errors.iter().map(|e| status_of(e.code())).collect();
        if statuses.contains(&StatusCode::INTERNAL_SERVER_ERROR) {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            statuses.first().copied().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let response: ErrorResponse = err.into();
        Self::new(response.errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed with {}: {:?}", status, self.errors);
        }
        let body = ErrorResponse {
            status: Some(status.as_u16()),
            errors: self.errors,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_codes_map_to_statuses() {
        assert_eq!(ApiError::from(LedgerError::bad_request("x")).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(LedgerError::not_found("x")).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(LedgerError::Db("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_error_dominates() {
        let err = ApiError::new(vec![
            ErrorDetail::new("missing", ErrorCode::NotFound),
            ErrorDetail::new("boom", ErrorCode::Internal),
        ]);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_uncoded_error_is_bad_request() {
        let err = ApiError::new(vec![ErrorDetail {
            message: "odd".to_string(),
            options: None,
        }]);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
