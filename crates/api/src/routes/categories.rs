//! Route definitions for categories.
//!
//! The public tree lives at `/categories`; management lives under
//! `/admin/categories` and requires a moderator role.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// ```text
/// GET    /categories                  category_tree
/// GET    /admin/categories            list_categories
/// POST   /admin/categories            create_category
/// GET    /admin/categories/{id}       get_category
/// PUT    /admin/categories/{id}       update_category
/// DELETE /admin/categories/{id}       delete_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::category_tree))
        .route(
            "/admin/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/admin/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
}
