//! # REST API Interface Layer
//!
//! HTTP endpoints over the accounts service. Handlers only translate between
//! HTTP and the service's parameter objects; every result is wrapped in a
//! HATEOAS envelope and every error becomes `{status, errors}` with the
//! status derived from the error codes.
//!
//! ## Routes (relative to the configured base path)
//!
//! - `POST /` and `GET /?id&holderId&count&index`
//! - `GET /:id`
//! - `POST /:id/transactions` and `GET /:id/transactions?actId&date&memoText&count&index`
//! - `GET /:id/transactions/:actId`
//! - `GET /:id/statements?fromDate&toDate` and `GET /:id/statements/:fromDate/:toDate`

pub mod account_apis;
pub mod act_apis;
pub mod errors;
pub mod extractors;
pub mod links;
pub mod mappers;

use axum::{
    http::{header::LOCATION, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use log::info;

use errors::ApiError;
use links::RequestUrl;

/// 201 with a `Location` pointing at the new resource
fn created(url: &RequestUrl, id: &str) -> Response {
    (StatusCode::CREATED, [(LOCATION, url.child(id))]).into_response()
}

/// Fallback for unknown routes
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    info!("{} {} - no such route", method, uri);
    ApiError::not_found(format!("{} not supported for path {}", method, uri.path()))
}

#[cfg(test)]
pub(crate) mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::backend::{
        config::ServerConfig, create_router, domain::AccountsService, storage::MemoryConnection, AppState,
    };

    pub(crate) fn test_app() -> Router {
        let service = AccountsService::new(Arc::new(MemoryConnection::new()));
        create_router(AppState::new(service), &ServerConfig::default()).unwrap()
    }

    pub(crate) async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        send(app, request.body(body).unwrap()).await
    }

    /// Send `body` verbatim with the given content type, if any
    pub(crate) async fn call_raw(
        app: &Router,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        let (status, _, value) = send(app, request.body(Body::from(body.to_string())).unwrap()).await;
        (status, value)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, value)
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = test_app();
        let (status, _, body) = call(&app, Method::GET, "/nowhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0]["options"]["code"], "NOT_FOUND");
        assert_eq!(body["errors"][0]["message"], "GET not supported for path /nowhere");
    }
}
