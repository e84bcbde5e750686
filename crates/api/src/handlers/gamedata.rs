//! Read-only endpoints over the static game catalog.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use codex_core::error::CoreError;
use codex_core::gamedata::Dataset;
use codex_core::search::{clamp_limit, normalize_query, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/data/{dataset}
///
/// Entries borrow from the catalog, so the response is rendered in place.
pub async fn list_entries(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> AppResult<Response> {
    let dataset = Dataset::parse(&dataset)?;
    Ok(Json(DataResponse {
        data: state.catalog.entries(dataset),
    })
    .into_response())
}

/// GET /api/data/{dataset}/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    Path((dataset, id)): Path<(String, String)>,
) -> AppResult<Response> {
    let dataset = Dataset::parse(&dataset)?;
    let entry = state
        .catalog
        .entry(dataset, &id)
        .ok_or_else(|| AppError::Core(CoreError::not_found(dataset.entity_name(), &id)))?;
    Ok(Json(DataResponse { data: entry }).into_response())
}

/// GET /api/data/search?q=
///
/// Case-insensitive name search across every dataset. A blank query matches
/// nothing.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let hits = match normalize_query(params.q.as_deref()) {
        Some(q) => state.catalog.search(&q, limit as usize),
        None => Vec::new(),
    };
    Ok(Json(DataResponse { data: hits }))
}
