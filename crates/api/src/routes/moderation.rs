//! Route definitions for the `/moderation` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::moderation;
use crate::state::AppState;

/// Routes mounted at `/moderation`.
///
/// ```text
/// GET    /pending                        list_pending
/// POST   /{version_id}                   moderate_version (?action=)
/// POST   /{version_id}/preview-token     issue_preview_token
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(moderation::list_pending))
        .route("/{version_id}", post(moderation::moderate_version))
        .route(
            "/{version_id}/preview-token",
            post(moderation::issue_preview_token),
        )
}
