//! Handlers for the moderation queue, moderation actions, and preview-token
//! issuance.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use codex_core::article::parse_id;
use codex_core::error::CoreError;
use codex_core::moderation::{normalize_reason, ModerationAction};
use codex_core::preview::{self, generate_preview_token};
use codex_core::types::{DbId, Timestamp};
use codex_db::models::article_version::ArticleVersion;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireModerator;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct ModerateParams {
    pub action: Option<String>,
}

/// Optional body of a moderation action.
#[derive(Debug, Default, Deserialize)]
pub struct ModerateRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewTokenResponse {
    /// Plaintext token. Returned once; only its hash is stored.
    pub token: String,
    pub version_id: DbId,
    pub expires_at: Timestamp,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch a version by id or return 404.
async fn ensure_version_exists(state: &AppState, id: DbId) -> AppResult<ArticleVersion> {
    state
        .store
        .find_version(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ArticleVersion", id)))
}

/// Parse the optional JSON body of a moderation action. An empty body means
/// no reason was given.
fn parse_moderate_body(body: &[u8]) -> AppResult<ModerateRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ModerateRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}

/* --------------------------------------------------------------------------
Queue
-------------------------------------------------------------------------- */

/// GET /api/moderation/pending
///
/// Pending versions, oldest first.
pub async fn list_pending(
    RequireModerator(_moderator): RequireModerator,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page();
    let pending = state
        .store
        .list_pending_versions(page.limit, page.offset)
        .await?;

    Ok(Json(DataResponse { data: pending }))
}

/* --------------------------------------------------------------------------
Actions
-------------------------------------------------------------------------- */

/// POST /api/moderation/{version_id}?action=approve|reject|revoke
///
/// The role check runs in the extractor, before anything else is parsed.
/// The transition is checked here for a clear error and again atomically
/// by the database function.
pub async fn moderate_version(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(version_id): Path<String>,
    Query(params): Query<ModerateParams>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let action = ModerationAction::parse(params.action.as_deref())?;
    let version_id = parse_id("version_id", &version_id)?;
    let request = parse_moderate_body(&body)?;
    let reason = normalize_reason(request.reason.as_deref())?;

    let version = ensure_version_exists(&state, version_id).await?;
    action.apply(version.status()?)?;

    let updated = state
        .store
        .apply_moderation(version_id, action, moderator.user_id, reason.as_deref())
        .await?;

    tracing::info!(
        user_id = %moderator.user_id,
        version_id = %version_id,
        article_id = %updated.article_id,
        action = %action,
        from = %version.status,
        to = %updated.status,
        "Article version moderated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/* --------------------------------------------------------------------------
Preview tokens
-------------------------------------------------------------------------- */

/// POST /api/moderation/{version_id}/preview-token
///
/// Issue a shareable link to an unpublished version. Moderators may preview
/// any version; other users only versions they edited.
pub async fn issue_preview_token(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(version_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let version_id = parse_id("version_id", &version_id)?;
    let version = ensure_version_exists(&state, version_id).await?;

    if !auth.role.can_moderate() && version.editor_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only moderators or the version's editor can share a preview".into(),
        )));
    }

    let status = version.status()?;
    if !status.is_previewable() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot preview a version with status '{status}'"
        ))));
    }

    let (token, token_hash) = generate_preview_token();
    let expires_at = preview::expires_at(chrono::Utc::now(), state.config.preview_token_ttl_hours);

    state
        .store
        .create_preview_token(version_id, &token_hash, auth.user_id, expires_at)
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        version_id = %version_id,
        %expires_at,
        "Preview token issued"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PreviewTokenResponse {
                token,
                version_id,
                expires_at,
            },
        }),
    ))
}
