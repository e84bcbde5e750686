//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement. Put them first in a handler's argument list so the
//! role check happens before the path, query, or body is looked at.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use codex_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Message returned when a non-moderator reaches a moderator-only route.
pub const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions to perform this action";

/// Requires the `reviewer` or `coordinator` role. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn moderate(RequireModerator(user): RequireModerator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireModerator(pub AuthUser);

impl FromRequestParts<AppState> for RequireModerator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.can_moderate() {
            tracing::debug!(user_id = %user.user_id, role = %user.role, "Moderator role required");
            return Err(AppError::Core(CoreError::Forbidden(
                INSUFFICIENT_PERMISSIONS.into(),
            )));
        }
        Ok(RequireModerator(user))
    }
}

/// Requires any authenticated user.
///
/// Equivalent to [`AuthUser`] but names the intent in route handlers.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
