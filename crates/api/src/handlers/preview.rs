//! Unauthenticated preview of an unpublished version.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use codex_core::error::CoreError;
use codex_core::preview::{hash_preview_token, validate_token_format};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/preview/{token}
///
/// Resolves only unexpired tokens whose version is still pending or
/// rejected. Approving a version invalidates its preview links.
pub async fn get_preview(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_token_format(&token)?;

    let version = state
        .store
        .resolve_preview_token(&hash_preview_token(&token))
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Preview", "token")))?;

    Ok(Json(DataResponse { data: version }))
}
