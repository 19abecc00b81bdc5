//! Body and query extractors whose rejections use the `{status, errors}` envelope.
use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    FromRequest, FromRequestParts,
};
use log::info;

use super::errors::ApiError;
use crate::backend::domain::errors::LedgerError;

/// `axum::Json`, but a missing content type or an undecodable body is `BAD_REQ`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query`, but an undecodable query string is `BAD_REQ`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        info!("Rejected request body: {}", rejection.body_text());
        LedgerError::bad_request(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        info!("Rejected query string: {}", rejection.body_text());
        LedgerError::bad_request(rejection.body_text()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{call, call_raw, test_app};
    use axum::http::{header::LOCATION, Method, StatusCode};
    use serde_json::Value;

    fn assert_bad_request(status: StatusCode, body: &Value) {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["errors"][0]["options"]["code"], "BAD_REQ");
        assert!(!body["errors"][0]["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = test_app();
        let (status, body) = call_raw(&app, Method::POST, "/accounts", Some("application/json"), "{").await;
        assert_bad_request(status, &body);
    }

    #[tokio::test]
    async fn test_mistyped_field_is_bad_request() {
        let app = test_app();
        let (status, body) =
            call_raw(&app, Method::POST, "/accounts", Some("application/json"), r#"{"holderId": 7}"#).await;
        assert_bad_request(status, &body);
    }

    #[tokio::test]
    async fn test_non_json_content_type_is_bad_request() {
        let app = test_app();
        let (status, body) =
            call_raw(&app, Method::POST, "/accounts", Some("text/plain"), r#"{"holderId": "H1"}"#).await;
        assert_bad_request(status, &body);
        let (status, body) = call_raw(&app, Method::POST, "/accounts", None, r#"{"holderId": "H1"}"#).await;
        assert_bad_request(status, &body);
    }

    #[tokio::test]
    async fn test_bad_act_body_is_bad_request() {
        let app = test_app();
        let (_, headers, _) = call(&app, Method::POST, "/accounts", Some(serde_json::json!({"holderId": "H1"}))).await;
        let account = headers[LOCATION].to_str().unwrap().trim_start_matches("http://localhost").to_string();
        let path = format!("{}/transactions", account);
        let (status, body) = call_raw(&app, Method::POST, &path, Some("application/json"), "[1, 2]").await;
        assert_bad_request(status, &body);
    }

    #[tokio::test]
    async fn test_repeated_query_key_is_bad_request() {
        let app = test_app();
        let (status, _, body) = call(&app, Method::GET, "/accounts?holderId=H1&holderId=H2", None).await;
        assert_bad_request(status, &body);
    }
}
