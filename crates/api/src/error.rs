//! HTTP error type and its JSON rendering.
//!
//! Every failure leaves a handler as `{ "error": message, "code": CODE }`.
//! Internal failures are logged in full and rendered with a fixed message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use codex_core::error::CoreError;
use codex_db::store::StoreError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error returned by every handler and extractor.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain errors from `codex_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Failures reported by the content store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed input that never reached the domain layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

struct Rendered(StatusCode, &'static str, String);

impl Rendered {
    fn internal() -> Self {
        Self(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            INTERNAL_MESSAGE.to_string(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Rendered(status, code, error) = match self {
            AppError::Core(err) => render_core(err),
            AppError::Store(err) => render_store(err),
            AppError::BadRequest(msg) => Rendered(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Rendered::internal()
            }
        };

        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn render_core(err: CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => Rendered(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => Rendered(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        CoreError::Conflict(msg) => Rendered(StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Unauthorized(msg) => Rendered(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        CoreError::Forbidden(msg) => Rendered(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            Rendered::internal()
        }
    }
}

/// `NotFound` comes from SQLSTATE `P0002`; `Conflict` from wrong-state
/// transitions, foreign keys, and `uq_*` constraints. Anything else is a 500.
fn render_store(err: StoreError) -> Rendered {
    match err {
        StoreError::NotFound(msg) => Rendered(StatusCode::NOT_FOUND, "NOT_FOUND", msg),
        StoreError::Conflict(msg) => Rendered(StatusCode::CONFLICT, "CONFLICT", msg),
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            Rendered::internal()
        }
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "Store error");
            Rendered::internal()
        }
    }
}
