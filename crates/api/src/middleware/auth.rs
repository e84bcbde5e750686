//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use codex_core::error::CoreError;
use codex_core::roles::Role;
use codex_core::types::DbId;
use codex_db::models::user::UserResponse;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a JWT Bearer token in the `Authorization`
/// header.
///
/// The token only identifies the user; the role comes from the user row so
/// that revoking a moderator's role takes effect on their next request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's current role.
    pub role: Role,
    /// Public profile of the user.
    pub profile: UserResponse,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let user = state
            .store
            .find_user(claims.sub)
            .await?
            .ok_or_else(|| unauthorized("User no longer exists"))?;

        let role = Role::parse(&user.role)?;

        Ok(AuthUser {
            user_id: user.id,
            role,
            profile: UserResponse::from(&user),
        })
    }
}

/// The credential from `Authorization: Bearer <token>`. The scheme is
/// matched case-insensitively.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>",
        )),
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}
