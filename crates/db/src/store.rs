//! The content store seam.
//!
//! Handlers reach the database only through [`ContentStore`]. [`PgStore`] is
//! the production implementation on top of the repositories; integration
//! tests substitute an in-memory one.

use std::sync::Arc;

use async_trait::async_trait;
use codex_core::moderation::ModerationAction;
use codex_core::types::{DbId, Timestamp};

use crate::models::article::{Article, CreateArticle, PublishedArticle};
use crate::models::article_version::{ArticleVersion, CreateArticleVersion, PendingVersion};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::user::User;
use crate::repositories::{
    ArticleRepo, ArticleVersionRepo, CategoryRepo, PreviewTokenRepo, UserRepo,
};
use crate::DbPool;

/// SQLSTATE raised by database functions when the target row does not exist.
pub const SQLSTATE_NO_DATA_FOUND: &str = "P0002";

/// SQLSTATE raised by transition functions when the row is in the wrong state.
pub const SQLSTATE_WRONG_STATE: &str = "55000";

/// SQLSTATE for a foreign key violation (e.g. deleting a category in use).
pub const SQLSTATE_FOREIGN_KEY_VIOLATION: &str = "23503";

/// SQLSTATE for a unique constraint violation.
pub const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by a [`ContentStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database function reported that its target row does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The row exists but is not in a state that permits the operation.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A non-database backend failure.
    #[error("Store error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code();
            if let Some(sqlstate) = code.as_deref() {
                tracing::debug!(
                    sqlstate,
                    message = %db_err.message(),
                    "Classifying database error"
                );
            }
            match code.as_deref() {
                Some(SQLSTATE_NO_DATA_FOUND) => {
                    return StoreError::NotFound(db_err.message().to_string())
                }
                Some(SQLSTATE_WRONG_STATE) => {
                    return StoreError::Conflict(db_err.message().to_string())
                }
                Some(SQLSTATE_FOREIGN_KEY_VIOLATION) => {
                    return StoreError::Conflict(
                        "The operation conflicts with a related record".to_string(),
                    )
                }
                // Named `uq_*` constraints are user-facing duplicates.
                Some(SQLSTATE_UNIQUE_VIOLATION) => {
                    if let Some(constraint) = db_err.constraint().filter(|c| c.starts_with("uq_")) {
                        return StoreError::Conflict(format!(
                            "Duplicate value violates unique constraint: {constraint}"
                        ));
                    }
                }
                _ => {}
            }
            tracing::warn!(sqlstate = ?code, "Unclassified database error");
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Every read and write the API performs against the system of record.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Confirm the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    // -- users -----------------------------------------------------------------

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>>;

    async fn find_user_by_nickname(&self, nickname: &str) -> StoreResult<Option<User>>;

    // -- articles --------------------------------------------------------------

    async fn create_article(&self, input: &CreateArticle) -> StoreResult<Article>;

    async fn find_article(&self, id: DbId) -> StoreResult<Option<Article>>;

    async fn delete_article(&self, id: DbId) -> StoreResult<bool>;

    async fn list_published_articles(
        &self,
        category_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<PublishedArticle>>;

    async fn find_published_article(&self, article_id: DbId)
        -> StoreResult<Option<PublishedArticle>>;

    // -- versions & moderation -------------------------------------------------

    /// Create a pending version (`submit_article`).
    async fn submit_version(&self, input: &CreateArticleVersion) -> StoreResult<ArticleVersion>;

    async fn find_version(&self, id: DbId) -> StoreResult<Option<ArticleVersion>>;

    async fn list_versions(&self, article_id: DbId) -> StoreResult<Vec<ArticleVersion>>;

    async fn list_pending_versions(&self, limit: i64, offset: i64)
        -> StoreResult<Vec<PendingVersion>>;

    /// Apply a moderation transition through its database function.
    async fn apply_moderation(
        &self,
        version_id: DbId,
        action: ModerationAction,
        moderator_id: DbId,
        reason: Option<&str>,
    ) -> StoreResult<ArticleVersion>;

    // -- preview tokens --------------------------------------------------------

    async fn create_preview_token(
        &self,
        version_id: DbId,
        token_hash: &str,
        created_by: DbId,
        expires_at: Timestamp,
    ) -> StoreResult<()>;

    async fn resolve_preview_token(&self, token_hash: &str)
        -> StoreResult<Option<ArticleVersion>>;

    // -- categories ------------------------------------------------------------

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>>;

    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category>;

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>>;

    async fn delete_category(&self, id: DbId) -> StoreResult<bool>;
}

/// Shared handle stored in application state.
pub type DynContentStore = Arc<dyn ContentStore>;

/// [`ContentStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_nickname(&self, nickname: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_nickname(&self.pool, nickname).await?)
    }

    async fn create_article(&self, input: &CreateArticle) -> StoreResult<Article> {
        Ok(ArticleRepo::create(&self.pool, input).await?)
    }

    async fn find_article(&self, id: DbId) -> StoreResult<Option<Article>> {
        Ok(ArticleRepo::find_by_id(&self.pool, id).await?)
    }

    async fn delete_article(&self, id: DbId) -> StoreResult<bool> {
        Ok(ArticleRepo::delete(&self.pool, id).await?)
    }

    async fn list_published_articles(
        &self,
        category_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<PublishedArticle>> {
        Ok(ArticleRepo::list_published(&self.pool, category_id, limit, offset).await?)
    }

    async fn find_published_article(
        &self,
        article_id: DbId,
    ) -> StoreResult<Option<PublishedArticle>> {
        Ok(ArticleRepo::find_published(&self.pool, article_id).await?)
    }

    async fn submit_version(&self, input: &CreateArticleVersion) -> StoreResult<ArticleVersion> {
        Ok(ArticleVersionRepo::submit(&self.pool, input).await?)
    }

    async fn find_version(&self, id: DbId) -> StoreResult<Option<ArticleVersion>> {
        Ok(ArticleVersionRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_versions(&self, article_id: DbId) -> StoreResult<Vec<ArticleVersion>> {
        Ok(ArticleVersionRepo::list_by_article(&self.pool, article_id).await?)
    }

    async fn list_pending_versions(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<PendingVersion>> {
        Ok(ArticleVersionRepo::list_pending(&self.pool, limit, offset).await?)
    }

    async fn apply_moderation(
        &self,
        version_id: DbId,
        action: ModerationAction,
        moderator_id: DbId,
        reason: Option<&str>,
    ) -> StoreResult<ArticleVersion> {
        Ok(
            ArticleVersionRepo::apply_action(&self.pool, version_id, action, moderator_id, reason)
                .await?,
        )
    }

    async fn create_preview_token(
        &self,
        version_id: DbId,
        token_hash: &str,
        created_by: DbId,
        expires_at: Timestamp,
    ) -> StoreResult<()> {
        Ok(
            PreviewTokenRepo::create(&self.pool, version_id, token_hash, created_by, expires_at)
                .await?,
        )
    }

    async fn resolve_preview_token(
        &self,
        token_hash: &str,
    ) -> StoreResult<Option<ArticleVersion>> {
        Ok(PreviewTokenRepo::resolve(&self.pool, token_hash).await?)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(CategoryRepo::list(&self.pool).await?)
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category> {
        Ok(CategoryRepo::create(&self.pool, input).await?)
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<bool> {
        Ok(CategoryRepo::delete(&self.pool, id).await?)
    }
}
