//! # Backend Module
//!
//! Everything behind the HTTP socket of the ledger server.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, HATEOAS links)
//!     ↓
//! Domain Layer (AccountsService, validation, ledger algorithms)
//!     ↓
//! Storage Layer (in-memory model or SQLite DAO)
//! ```
//!
//! The storage backend is a type parameter of the service and the router,
//! so both backends run through exactly the same domain and IO code.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use config::{ServerConfig, StorageConfig};
use domain::AccountsService;
use io::rest::{account_apis, act_apis};
use storage::Connection;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState<C: Connection> {
    pub accounts_service: AccountsService<C>,
}

impl<C: Connection> AppState<C> {
    pub fn new(accounts_service: AccountsService<C>) -> Self {
        Self { accounts_service }
    }
}

/// Build the service over `connection`, resetting storage when configured
pub async fn initialize_backend<C: Connection>(connection: C, storage: &StorageConfig) -> Result<AppState<C>> {
    info!("Setting up domain model");
    let accounts_service = AccountsService::new(Arc::new(connection));

    if storage.clear_on_start {
        info!("Clearing all accounts and acts");
        accounts_service.clear().await?;
    }

    Ok(AppState::new(accounts_service))
}

fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .expose_headers([axum::http::header::LOCATION]);
    Ok(match origin {
        Some(origin) => cors.allow_origin(origin.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    })
}

/// Create the Axum router with all routes mounted under the configured base path
pub fn create_router<C: Connection>(app_state: AppState<C>, server: &ServerConfig) -> Result<Router> {
    let account_routes = Router::new()
        .route(
            "/",
            get(account_apis::search_accounts::<C>).post(account_apis::create_account::<C>),
        )
        .route("/:id", get(account_apis::get_account::<C>))
        .route(
            "/:id/transactions",
            get(act_apis::query_acts::<C>).post(act_apis::create_act::<C>),
        )
        .route("/:id/transactions/:act_id", get(act_apis::get_act::<C>))
        .route("/:id/statements", get(act_apis::get_statement::<C>))
        .route(
            "/:id/statements/:from_date/:to_date",
            get(act_apis::get_statement_range::<C>),
        );

    let base_path = server.base_path.trim_end_matches('/');
    let router = if base_path.is_empty() {
        Router::new().merge(account_routes)
    } else {
        Router::new().nest(base_path, account_routes)
    };

    Ok(router
        .fallback(io::rest::not_found)
        .layer(cors_layer(server.cors_origin.as_deref())?)
        .with_state(app_state))
}
