//! Handlers for articles: published reads, submission intake, edits, and
//! version history.
//!
//! A submission writes two rows in sequence (the article, then its first
//! version via `submit_article`). There is no transaction spanning both, so
//! a failed second step is undone with a compensating delete of the article.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use codex_core::article::{parse_id, validate_content, validate_submission, validate_title};
use codex_core::error::CoreError;
use codex_core::moderation::VersionStatus;
use codex_core::types::DbId;
use codex_db::models::article::{Article, CreateArticle};
use codex_db::models::article_version::{ArticleVersion, CreateArticleVersion};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct ListArticlesParams {
    pub category_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body of `POST /articles/submit`. Fields are optional so a missing field
/// is reported as a validation error naming it.
#[derive(Debug, Deserialize)]
pub struct SubmitArticleRequest {
    pub title: Option<String>,
    pub category_id: Option<String>,
    pub content: Option<String>,
}

/// Body of `POST /articles/{id}/edit`. Omitted title and category are carried
/// forward from the published version, or from the article row when nothing
/// has been approved yet.
#[derive(Debug, Deserialize)]
pub struct EditArticleRequest {
    pub title: Option<String>,
    pub category_id: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub article: Article,
    pub version: ArticleVersion,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch an article by id or return 404.
async fn ensure_article_exists(state: &AppState, id: DbId) -> AppResult<Article> {
    state
        .store
        .find_article(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Article", id)))
}

/* --------------------------------------------------------------------------
Published reads
-------------------------------------------------------------------------- */

/// GET /api/articles
///
/// List the latest approved version of each article, optionally within one
/// category.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListArticlesParams>,
) -> AppResult<impl IntoResponse> {
    let category_id = params
        .category_id
        .as_deref()
        .map(|raw| parse_id("category_id", raw))
        .transpose()?;
    let page = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .page();

    let articles = state
        .store
        .list_published_articles(category_id, page.limit, page.offset)
        .await?;

    Ok(Json(DataResponse { data: articles }))
}

/// GET /api/articles/{id}
///
/// The most recently approved version of the article. Articles with no
/// approved version are not found.
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("article_id", &id)?;
    let article = state
        .store
        .find_published_article(id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Article", id)))?;

    Ok(Json(DataResponse { data: article }))
}

/* --------------------------------------------------------------------------
Submission intake
-------------------------------------------------------------------------- */

/// POST /api/articles/submit (also POST /api/articles)
///
/// Create an article and its first pending version.
pub async fn submit_article(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmitArticleRequest>,
) -> AppResult<impl IntoResponse> {
    let submission = validate_submission(
        input.title.as_deref(),
        input.category_id.as_deref(),
        input.content.as_deref(),
    )?;

    let article = state
        .store
        .create_article(&CreateArticle {
            title: submission.title.clone(),
            author_id: auth.user_id,
            category_id: submission.category_id,
        })
        .await?;

    let version_input = CreateArticleVersion {
        article_id: article.id,
        editor_id: auth.user_id,
        title: submission.title,
        content: submission.content,
        category_id: submission.category_id,
    };

    let version = match state.store.submit_version(&version_input).await {
        Ok(version) => version,
        Err(err) => {
            tracing::warn!(
                user_id = %auth.user_id,
                article_id = %article.id,
                error = %err,
                "Version creation failed, removing orphaned article"
            );
            if let Err(cleanup_err) = state.store.delete_article(article.id).await {
                tracing::error!(
                    article_id = %article.id,
                    error = %cleanup_err,
                    "Compensating delete failed; article row left without versions"
                );
            }
            return Err(err.into());
        }
    };

    tracing::info!(
        user_id = %auth.user_id,
        article_id = %article.id,
        version_id = %version.id,
        "Article submitted for moderation"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmissionResponse { article, version },
        }),
    ))
}

/// POST /api/articles/{id}/edit
///
/// Propose a new pending version of an existing article.
pub async fn edit_article(
    RequireAuth(auth): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<EditArticleRequest>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("article_id", &id)?;

    let content = input
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("Missing required fields: content".into()))?;
    validate_content(&content)?;

    let title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| validate_title(t).map(|()| t.to_string()))
        .transpose()?;
    let category_id = input
        .category_id
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|raw| parse_id("category_id", raw))
        .transpose()?;

    let article = ensure_article_exists(&state, id).await?;

    // The articles row keeps its submission-time title and category; approved
    // edits only change the version rows.
    let (current_title, current_category) = match state.store.find_published_article(id).await? {
        Some(published) => (published.title, published.category_id),
        None => (article.title, article.category_id),
    };

    let version = state
        .store
        .submit_version(&CreateArticleVersion {
            article_id: article.id,
            editor_id: auth.user_id,
            title: title.unwrap_or(current_title),
            content,
            category_id: category_id.unwrap_or(current_category),
        })
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        article_id = %article.id,
        version_id = %version.id,
        "Article edit submitted for moderation"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: version })))
}

/* --------------------------------------------------------------------------
Version history
-------------------------------------------------------------------------- */

/// GET /api/articles/{id}/versions
///
/// Moderators see every version. Everyone else sees approved versions and
/// the versions they edited.
pub async fn list_versions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id("article_id", &id)?;
    ensure_article_exists(&state, id).await?;

    let mut versions = state.store.list_versions(id).await?;
    if !auth.role.can_moderate() {
        versions.retain(|v| {
            v.editor_id == auth.user_id || matches!(v.status(), Ok(VersionStatus::Approved))
        });
    }

    Ok(Json(DataResponse { data: versions }))
}
