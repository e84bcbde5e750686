use axum::routing::get;
use axum::Router;

use crate::handlers::preview;
use crate::state::AppState;

/// Routes mounted at `/preview`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{token}", get(preview::get_preview))
}
