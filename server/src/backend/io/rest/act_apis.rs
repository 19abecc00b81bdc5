//! # REST API for Transactions
//!
//! Endpoints for posting acts, querying them and producing statements.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use log::{error, info};
use shared::{NewActParams, QueryParams, StatementParams};

use super::{
    created,
    errors::ApiError,
    extractors::{ApiJson, ApiQuery},
    links::{linked, Page, RequestUrl},
};
use crate::backend::{storage::Connection, AppState};

/// Post a new act to an account
pub async fn create_act<C: Connection>(
    State(state): State<AppState<C>>,
    url: RequestUrl,
    Path(id): Path<String>,
    ApiJson(params): ApiJson<NewActParams>,
) -> Response {
    info!("POST {} - request: {:?}", url.href(), params);

    let params = NewActParams { id: Some(id), ..params };
    match state.accounts_service.new_act(params).await {
        Ok(act_id) => created(&url, &act_id),
        Err(e) => {
            error!("Failed to post act: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Query an account's acts, one page at a time
pub async fn query_acts<C: Connection>(
    State(state): State<AppState<C>>,
    url: RequestUrl,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<QueryParams>,
) -> Response {
    info!("GET {} - query: {:?}", url.href(), params);

    let page = match Page::from_params(params.count.as_deref(), params.index.as_deref()) {
        Ok(page) => page,
        Err(e) => return ApiError::from(e).into_response(),
    };
    let params = QueryParams {
        id: Some(id),
        count: Some(page.lookahead_count()),
        ..params
    };

    match state.accounts_service.query(params).await {
        Ok(acts) => Json(page.envelope(acts, &url, |act| act.id.as_str())).into_response(),
        Err(e) => {
            error!("Failed to query acts: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Get a single act of an account
pub async fn get_act<C: Connection>(
    State(state): State<AppState<C>>,
    url: RequestUrl,
    Path((id, act_id)): Path<(String, String)>,
) -> Response {
    info!("GET {}", url.href());

    let params = QueryParams {
        id: Some(id.clone()),
        act_id: Some(act_id.clone()),
        ..Default::default()
    };
    match state.accounts_service.query(params).await {
        Ok(acts) => match acts.into_iter().next() {
            Some(act) => Json(linked(act, &url)).into_response(),
            None => ApiError::not_found(format!("no act {} in account {}", act_id, id)).into_response(),
        },
        Err(e) => {
            error!("Failed to get act: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Statement with optional `fromDate`/`toDate` query parameters
pub async fn get_statement<C: Connection>(
    State(state): State<AppState<C>>,
    url: RequestUrl,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<StatementParams>,
) -> Response {
    info!("GET {} - query: {:?}", url.href(), params);
    statement(state, url, StatementParams { id: Some(id), ..params }).await
}

/// Statement for an inclusive date range given in the path
pub async fn get_statement_range<C: Connection>(
    State(state): State<AppState<C>>,
    url: RequestUrl,
    Path((id, from_date, to_date)): Path<(String, String, String)>,
) -> Response {
    info!("GET {}", url.href());
    let params = StatementParams {
        id: Some(id),
        from_date: Some(from_date),
        to_date: Some(to_date),
    };
    statement(state, url, params).await
}

async fn statement<C: Connection>(state: AppState<C>, url: RequestUrl, params: StatementParams) -> Response {
    match state.accounts_service.statement(params).await {
        Ok(lines) => Json(linked(lines, &url)).into_response(),
        Err(e) => {
            error!("Failed to build statement: {}", e);
            ApiError::from(e).into_response()
        }
    }
}
