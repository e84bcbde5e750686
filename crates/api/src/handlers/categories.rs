//! Handlers for the category tree: the public read and the
//! moderator-only management endpoints under `/admin/categories`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use codex_core::article::parse_id;
use codex_core::category::{build_category_tree, validate_name, validate_visibility, CategoryNode};
use codex_core::error::CoreError;
use codex_core::types::DbId;
use codex_db::models::category::{CreateCategory, UpdateCategory};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireModerator;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request types
-------------------------------------------------------------------------- */

/// Body of `POST /admin/categories`.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub parent_category_id: Option<String>,
    pub default_visibility: Option<String>,
}

/// Body of `PUT /admin/categories/{id}`. `None` fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub parent_category_id: Option<String>,
    #[serde(default)]
    pub clear_parent: bool,
    pub default_visibility: Option<String>,
}

/// Parse an optional `parent_category_id`. A blank value counts as absent.
fn parse_parent(raw: Option<&str>) -> Result<Option<DbId>, CoreError> {
    raw.map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| parse_id("parent_category_id", p))
        .transpose()
}

/* --------------------------------------------------------------------------
Public
-------------------------------------------------------------------------- */

/// GET /api/categories
///
/// The category forest with children nested under their parents.
pub async fn category_tree(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = state.store.list_categories().await?;
    let tree = build_category_tree(rows.into_iter().map(CategoryNode::from).collect());
    Ok(Json(DataResponse { data: tree }))
}

/* --------------------------------------------------------------------------
Management
-------------------------------------------------------------------------- */

/// GET /api/admin/categories
pub async fn list_categories(
    RequireModerator(_moderator): RequireModerator,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = state.store.list_categories().await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/admin/categories/{id}
pub async fn get_category(
    RequireModerator(_moderator): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("category_id", &id)?;
    let category = state
        .store
        .find_category(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/admin/categories
pub async fn create_category(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| CoreError::Validation("Missing required fields: name".into()))?;
    validate_name(name)?;
    if let Some(ref visibility) = input.default_visibility {
        validate_visibility(visibility)?;
    }
    let parent_category_id = parse_parent(input.parent_category_id.as_deref())?;

    let category = state
        .store
        .create_category(&CreateCategory {
            name: name.to_string(),
            parent_category_id,
            default_visibility: input.default_visibility,
        })
        .await?;

    tracing::info!(
        user_id = %moderator.user_id,
        category_id = %category.id,
        name = %category.name,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("category_id", &id)?;

    let name = input.name.as_deref().map(str::trim);
    if let Some(name) = name {
        validate_name(name)?;
    }
    if let Some(ref visibility) = input.default_visibility {
        validate_visibility(visibility)?;
    }
    let parent_category_id = parse_parent(input.parent_category_id.as_deref())?;

    let update = UpdateCategory {
        name: name.map(str::to_string),
        parent_category_id,
        clear_parent: input.clear_parent,
        default_visibility: input.default_visibility,
    };

    let category = state
        .store
        .update_category(id, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Category", id)))?;

    tracing::info!(user_id = %moderator.user_id, category_id = %id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/admin/categories/{id}
///
/// Child categories are detached to the top level. Categories still used by
/// articles cannot be deleted (409).
pub async fn delete_category(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id("category_id", &id)?;

    if !state.store.delete_category(id).await? {
        return Err(AppError::Core(CoreError::not_found("Category", id)));
    }

    tracing::info!(user_id = %moderator.user_id, category_id = %id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
