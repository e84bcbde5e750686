//! Route definitions for the `/articles` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/articles`.
///
/// ```text
/// GET    /                 list_articles
/// POST   /                 submit_article
/// POST   /submit           submit_article
/// GET    /{id}             get_article
/// POST   /{id}/edit        edit_article
/// GET    /{id}/versions    list_versions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(articles::list_articles).post(articles::submit_article),
        )
        .route("/submit", post(articles::submit_article))
        .route("/{id}", get(articles::get_article))
        .route("/{id}/edit", post(articles::edit_article))
        .route("/{id}/versions", get(articles::list_versions))
}
