pub mod articles;
pub mod auth;
pub mod categories;
pub mod gamedata;
pub mod health;
pub mod moderation;
pub mod preview;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      credential login (public)
/// /auth/me                                         caller profile
///
/// /articles                                        list published, submit (alias)
/// /articles/submit                                 submit
/// /articles/{id}                                   latest approved version
/// /articles/{id}/edit                              propose new version
/// /articles/{id}/versions                          version history
///
/// /moderation/pending                              moderation queue
/// /moderation/{version_id}                         ?action=approve|reject|revoke
/// /moderation/{version_id}/preview-token           issue preview link
///
/// /preview/{token}                                 unauthenticated preview
///
/// /categories                                      public category tree
/// /admin/categories                                list, create (moderators)
/// /admin/categories/{id}                           update, delete (moderators)
///
/// /data/search                                     search static catalog
/// /data/{dataset}                                  list dataset
/// /data/{dataset}/{id}                             one entry
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/articles", articles::router())
        .nest("/moderation", moderation::router())
        .nest("/preview", preview::router())
        .merge(categories::router())
        .nest("/data", gamedata::router())
}
