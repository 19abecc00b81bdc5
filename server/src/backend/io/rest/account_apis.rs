//! # REST API for Accounts
//!
//! Endpoints for opening, looking up and searching accounts.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use log::{error, info};
use shared::{AccountParams, NewAccountParams, SearchAccountsParams};

use super::{
    created,
    errors::ApiError,
    extractors::{ApiJson, ApiQuery},
    links::{linked, Page, RequestUrl},
};
use crate::backend::{storage::Connection, AppState};

/// Open a new account for a holder
pub async fn create_account<C: Connection>(
    State(state): State<AppState<C>>,
    url: RequestUrl,
    ApiJson(params): ApiJson<NewAccountParams>,
) -> Response {
    info!("POST {} - request: {:?}", url.href(), params);

    match state.accounts_service.new_account(params).await {
        Ok(id) => created(&url, &id),
        Err(e) => {
            error!("Failed to create account: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Get a single account
pub async fn get_account<C: Connection>(
    State(state): State<AppState<C>>,
    url: RequestUrl,
    Path(id): Path<String>,
) -> Response {
    info!("GET {}", url.href());

    match state.accounts_service.info(AccountParams { id: Some(id) }).await {
        Ok(account) => Json(linked(account, &url)).into_response(),
        Err(e) => {
            error!("Failed to get account: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Search accounts by id and holder, one page at a time
pub async fn search_accounts<C: Connection>(
    State(state): State<AppState<C>>,
    url: RequestUrl,
    ApiQuery(params): ApiQuery<SearchAccountsParams>,
) -> Response {
    info!("GET {} - query: {:?}", url.href(), params);

    let page = match Page::from_params(params.count.as_deref(), params.index.as_deref()) {
        Ok(page) => page,
        Err(e) => return ApiError::from(e).into_response(),
    };
    let params = SearchAccountsParams {
        count: Some(page.lookahead_count()),
        ..params
    };

    match state.accounts_service.search_accounts(params).await {
        Ok(accounts) => Json(page.envelope(accounts, &url, |account| account.id.as_str())).into_response(),
        Err(e) => {
            error!("Failed to search accounts: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{call, test_app};
    use axum::http::{header::LOCATION, Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_then_get_account() {
        let app = test_app();
        let (status, headers, _) = call(&app, Method::POST, "/accounts", Some(json!({"holderId": "H1"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let location = headers[LOCATION].to_str().unwrap().to_string();
        assert!(location.starts_with("http://localhost/accounts/1_"));

        let path = location.trim_start_matches("http://localhost");
        let (status, _, body) = call(&app, Method::GET, path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["holderId"], "H1");
        assert_eq!(body["result"]["balance"], 0.0);
        assert_eq!(body["links"][0]["rel"], "self");
        assert_eq!(body["links"][0]["href"], location);
    }

    #[tokio::test]
    async fn test_missing_holder_is_400() {
        let app = test_app();
        let (status, _, body) = call(&app, Method::POST, "/accounts", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["errors"][0]["options"]["code"], "BAD_REQ");
    }

    #[tokio::test]
    async fn test_unknown_account_is_404() {
        let app = test_app();
        let (status, _, body) = call(&app, Method::GET, "/accounts/nonexistent", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["options"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_search_pages_through_holder_accounts() {
        let app = test_app();
        for holder in ["H1", "H2", "H1", "H1"] {
            call(&app, Method::POST, "/accounts", Some(json!({ "holderId": holder }))).await;
        }

        let (status, _, body) = call(&app, Method::GET, "/accounts?holderId=H1&count=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"].as_array().unwrap().len(), 2);
        let rels: Vec<&str> = body["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|link| link["rel"].as_str().unwrap())
            .collect();
        assert_eq!(rels, vec!["self", "next"]);
        let next = body["links"][1]["href"].as_str().unwrap().trim_start_matches("http://localhost").to_string();

        let (_, _, body) = call(&app, Method::GET, &next, None).await;
        let page = body["result"].as_array().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["result"]["holderId"], "H1");
        let rels: Vec<&str> = body["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|link| link["rel"].as_str().unwrap())
            .collect();
        assert_eq!(rels, vec!["self", "prev"]);
    }

    #[tokio::test]
    async fn test_search_with_largest_count_and_index() {
        let app = test_app();
        call(&app, Method::POST, "/accounts", Some(json!({"holderId": "H1"}))).await;
        let max = usize::MAX;
        let uri = format!("/accounts?count={}&index={}", max, max);
        let (status, _, body) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["result"].as_array().unwrap().is_empty());
        assert_eq!(body["links"][1]["rel"], "prev");

        let (status, _, body) = call(&app, Method::GET, &format!("/accounts?count={}", max), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"].as_array().unwrap().len(), 1);
        assert_eq!(body["links"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_count_page_has_no_next() {
        let app = test_app();
        call(&app, Method::POST, "/accounts", Some(json!({"holderId": "H1"}))).await;
        let (status, _, body) = call(&app, Method::GET, "/accounts?count=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["result"].as_array().unwrap().is_empty());
        assert_eq!(body["links"].as_array().unwrap().len(), 1);
        assert_eq!(body["links"][0]["rel"], "self");
    }

    #[tokio::test]
    async fn test_search_rejects_bad_count() {
        let app = test_app();
        let (status, _, _) = call(&app, Method::GET, "/accounts?count=many", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
