//! Route definitions for the static game catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::gamedata;
use crate::state::AppState;

/// Routes mounted at `/data`.
///
/// ```text
/// GET /search            search
/// GET /{dataset}         list_entries
/// GET /{dataset}/{id}    get_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(gamedata::search))
        .route("/{dataset}", get(gamedata::list_entries))
        .route("/{dataset}/{id}", get(gamedata::get_entry))
}
