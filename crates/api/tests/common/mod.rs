//! Shared helpers for HTTP integration tests.
//!
//! Tests drive the real router (same middleware stack as production) against
//! [`MemoryStore`], an in-memory [`ContentStore`] that mirrors the behaviour
//! of the database functions closely enough for the HTTP layer: `P0002`-style
//! not-found errors, wrong-state conflicts, and failure injection for the
//! submission path.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use codex_api::auth::jwt::{generate_access_token, JwtConfig};
use codex_api::auth::password::hash_password;
use codex_api::config::ServerConfig;
use codex_api::router::build_app_router;
use codex_api::state::AppState;
use codex_core::gamedata::GameCatalog;
use codex_core::moderation::{ModerationAction, VersionStatus};
use codex_core::types::{DbId, Timestamp};
use codex_db::models::article::{Article, CreateArticle, PublishedArticle};
use codex_db::models::article_version::{ArticleVersion, CreateArticleVersion, PendingVersion};
use codex_db::models::category::{Category, CreateCategory, UpdateCategory};
use codex_db::models::user::User;
use codex_db::store::{ContentStore, StoreError, StoreResult};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough-for-hmac";
pub const TEST_PASSWORD: &str = "correct-horse-battery-staple";

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

struct PreviewRow {
    version_id: DbId,
    expires_at: Timestamp,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    articles: Vec<Article>,
    versions: Vec<ArticleVersion>,
    previews: HashMap<String, PreviewRow>,
}

/// In-memory [`ContentStore`] with failure injection.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Fail every `submit_version` call with a backend error.
    pub fail_submit: AtomicBool,
    /// Fail every `delete_article` call with a backend error.
    pub fail_delete_article: AtomicBool,
    /// Fail `ping`.
    pub fail_ping: AtomicBool,
    /// Number of mutating calls that reached the store.
    pub writes: AtomicUsize,
    /// Number of `delete_article` calls.
    pub article_deletes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("store mutex poisoned")
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    // -- seeding -------------------------------------------------------------

    pub fn add_user(&self, nickname: &str, role: &str) -> User {
        self.insert_user(nickname, role, None)
    }

    pub fn add_user_with_password(&self, nickname: &str, role: &str) -> User {
        let hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
        self.insert_user(nickname, role, Some(hash))
    }

    fn insert_user(&self, nickname: &str, role: &str, password_hash: Option<String>) -> User {
        let user = User {
            id: Uuid::new_v4(),
            nickname: nickname.to_string(),
            role: role.to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        self.tables().users.push(user.clone());
        user
    }

    pub fn set_role(&self, user_id: DbId, role: &str) {
        let mut t = self.tables();
        if let Some(u) = t.users.iter_mut().find(|u| u.id == user_id) {
            u.role = role.to_string();
        }
    }

    pub fn add_category(&self, name: &str, parent: Option<DbId>) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            parent_category_id: parent,
            default_visibility: "public".to_string(),
            created_at: Utc::now(),
        };
        self.tables().categories.push(category.clone());
        category
    }

    /// Seed an article with a single version in the given status.
    pub fn add_article(
        &self,
        author: &User,
        category: &Category,
        title: &str,
        status: VersionStatus,
    ) -> (Article, ArticleVersion) {
        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author_id: author.id,
            category_id: category.id,
            created_at: now,
        };
        let moderated = status != VersionStatus::Pending;
        let version = ArticleVersion {
            id: Uuid::new_v4(),
            article_id: article.id,
            editor_id: author.id,
            title: title.to_string(),
            content: format!("Content of {title}"),
            category_id: category.id,
            status: status.as_str().to_string(),
            moderated_by: None,
            moderated_at: moderated.then_some(now),
            moderation_reason: None,
            created_at: now,
        };
        let mut t = self.tables();
        t.articles.push(article.clone());
        t.versions.push(version.clone());
        (article, version)
    }

    /// Seed an extra version on an existing article.
    pub fn add_version(&self, article: &Article, editor: &User, status: VersionStatus) -> ArticleVersion {
        let now = Utc::now();
        let version = ArticleVersion {
            id: Uuid::new_v4(),
            article_id: article.id,
            editor_id: editor.id,
            title: format!("{} (rev)", article.title),
            content: "Revised content".to_string(),
            category_id: article.category_id,
            status: status.as_str().to_string(),
            moderated_by: None,
            moderated_at: (status != VersionStatus::Pending).then_some(now),
            moderation_reason: None,
            created_at: now,
        };
        self.tables().versions.push(version.clone());
        version
    }

    /// Store a preview token hash directly, bypassing the API.
    pub fn add_preview(&self, token_hash: &str, version_id: DbId, expires_at: Timestamp) {
        self.tables().previews.insert(
            token_hash.to_string(),
            PreviewRow {
                version_id,
                expires_at,
            },
        );
    }

    // -- inspection ----------------------------------------------------------

    pub fn article_count(&self) -> usize {
        self.tables().articles.len()
    }

    pub fn version(&self, id: DbId) -> Option<ArticleVersion> {
        self.tables().versions.iter().find(|v| v.id == id).cloned()
    }

    pub fn versions_of(&self, article_id: DbId) -> Vec<ArticleVersion> {
        self.tables()
            .versions
            .iter()
            .filter(|v| v.article_id == article_id)
            .cloned()
            .collect()
    }

    pub fn category(&self, id: DbId) -> Option<Category> {
        self.tables().categories.iter().find(|c| c.id == id).cloned()
    }

    pub fn preview_count(&self) -> usize {
        self.tables().previews.len()
    }

    pub fn has_preview(&self, token_hash: &str) -> bool {
        self.tables().previews.contains_key(token_hash)
    }
}

fn published_row(t: &Tables, v: &ArticleVersion) -> Option<PublishedArticle> {
    let article = t.articles.iter().find(|a| a.id == v.article_id)?;
    let author_nickname = t
        .users
        .iter()
        .find(|u| u.id == article.author_id)
        .map(|u| u.nickname.clone());
    Some(PublishedArticle {
        article_id: article.id,
        version_id: v.id,
        title: v.title.clone(),
        content: v.content.clone(),
        category_id: v.category_id,
        author_id: article.author_id,
        author_nickname,
        created_at: article.created_at,
        approved_at: v.moderated_at,
    })
}

/// Latest approved version of each article, like `article_versions_public_view`.
fn latest_approved(t: &Tables) -> Vec<PublishedArticle> {
    let mut latest: HashMap<DbId, &ArticleVersion> = HashMap::new();
    for v in t.versions.iter().filter(|v| v.status == "approved") {
        let newer = match latest.get(&v.article_id) {
            Some(current) => v.moderated_at >= current.moderated_at,
            None => true,
        };
        if newer {
            latest.insert(v.article_id, v);
        }
    }
    let mut rows: Vec<PublishedArticle> = latest
        .values()
        .filter_map(|v| published_row(t, v))
        .collect();
    rows.sort_by(|a, b| b.approved_at.cmp(&a.approved_at));
    rows
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection refused".into()));
        }
        Ok(())
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_nickname(&self, nickname: &str) -> StoreResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.nickname == nickname)
            .cloned())
    }

    async fn create_article(&self, input: &CreateArticle) -> StoreResult<Article> {
        self.record_write();
        let mut t = self.tables();
        if !t.categories.iter().any(|c| c.id == input.category_id) {
            return Err(StoreError::Conflict(
                "The operation conflicts with a related record".into(),
            ));
        }
        let article = Article {
            id: Uuid::new_v4(),
            title: input.title.clone(),
            author_id: input.author_id,
            category_id: input.category_id,
            created_at: Utc::now(),
        };
        t.articles.push(article.clone());
        Ok(article)
    }

    async fn find_article(&self, id: DbId) -> StoreResult<Option<Article>> {
        Ok(self.tables().articles.iter().find(|a| a.id == id).cloned())
    }

    async fn delete_article(&self, id: DbId) -> StoreResult<bool> {
        self.record_write();
        self.article_deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete_article.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("delete failed".into()));
        }
        let mut t = self.tables();
        let before = t.articles.len();
        t.articles.retain(|a| a.id != id);
        t.versions.retain(|v| v.article_id != id);
        Ok(t.articles.len() < before)
    }

    async fn list_published_articles(
        &self,
        category_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<PublishedArticle>> {
        let t = self.tables();
        Ok(latest_approved(&t)
            .into_iter()
            .filter(|p| category_id.map_or(true, |c| p.category_id == c))
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_published_article(
        &self,
        article_id: DbId,
    ) -> StoreResult<Option<PublishedArticle>> {
        let t = self.tables();
        Ok(latest_approved(&t)
            .into_iter()
            .find(|p| p.article_id == article_id))
    }

    async fn submit_version(&self, input: &CreateArticleVersion) -> StoreResult<ArticleVersion> {
        self.record_write();
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("submit_article failed".into()));
        }
        let mut t = self.tables();
        if !t.articles.iter().any(|a| a.id == input.article_id) {
            return Err(StoreError::NotFound(format!(
                "Article {} not found",
                input.article_id
            )));
        }
        if !t.categories.iter().any(|c| c.id == input.category_id) {
            return Err(StoreError::Conflict(
                "The operation conflicts with a related record".into(),
            ));
        }
        let version = ArticleVersion {
            id: Uuid::new_v4(),
            article_id: input.article_id,
            editor_id: input.editor_id,
            title: input.title.clone(),
            content: input.content.clone(),
            category_id: input.category_id,
            status: "pending".to_string(),
            moderated_by: None,
            moderated_at: None,
            moderation_reason: None,
            created_at: Utc::now(),
        };
        t.versions.push(version.clone());
        Ok(version)
    }

    async fn find_version(&self, id: DbId) -> StoreResult<Option<ArticleVersion>> {
        Ok(self.version(id))
    }

    async fn list_versions(&self, article_id: DbId) -> StoreResult<Vec<ArticleVersion>> {
        let mut versions = self.versions_of(article_id);
        versions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(versions)
    }

    async fn list_pending_versions(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<PendingVersion>> {
        let t = self.tables();
        let mut pending: Vec<PendingVersion> = t
            .versions
            .iter()
            .filter(|v| v.status == "pending")
            .filter_map(|v| {
                let article = t.articles.iter().find(|a| a.id == v.article_id)?;
                Some(PendingVersion {
                    version_id: v.id,
                    article_id: v.article_id,
                    article_title: article.title.clone(),
                    title: v.title.clone(),
                    category_id: v.category_id,
                    editor_id: v.editor_id,
                    editor_nickname: t
                        .users
                        .iter()
                        .find(|u| u.id == v.editor_id)
                        .map(|u| u.nickname.clone()),
                    created_at: v.created_at,
                })
            })
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(pending
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn apply_moderation(
        &self,
        version_id: DbId,
        action: ModerationAction,
        moderator_id: DbId,
        reason: Option<&str>,
    ) -> StoreResult<ArticleVersion> {
        self.record_write();
        let mut t = self.tables();
        let version = t
            .versions
            .iter_mut()
            .find(|v| v.id == version_id)
            .ok_or_else(|| StoreError::NotFound(format!("Version {version_id} not found")))?;

        let expected = action.source_status();
        if version.status != expected.as_str() {
            return Err(StoreError::Conflict(format!(
                "Version {version_id} is {}, expected {expected}",
                version.status
            )));
        }
        version.status = action.target_status().as_str().to_string();
        version.moderated_by = Some(moderator_id);
        version.moderated_at = Some(Utc::now());
        version.moderation_reason = reason.map(str::to_string);
        let updated = version.clone();

        if action == ModerationAction::Approve {
            t.previews.retain(|_, p| p.version_id != version_id);
        }
        Ok(updated)
    }

    async fn create_preview_token(
        &self,
        version_id: DbId,
        token_hash: &str,
        _created_by: DbId,
        expires_at: Timestamp,
    ) -> StoreResult<()> {
        self.record_write();
        let mut t = self.tables();
        if !t.versions.iter().any(|v| v.id == version_id) {
            return Err(StoreError::NotFound(format!("Version {version_id} not found")));
        }
        t.previews.insert(
            token_hash.to_string(),
            PreviewRow {
                version_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn resolve_preview_token(
        &self,
        token_hash: &str,
    ) -> StoreResult<Option<ArticleVersion>> {
        let t = self.tables();
        let Some(row) = t.previews.get(token_hash) else {
            return Ok(None);
        };
        if row.expires_at <= Utc::now() {
            return Ok(None);
        }
        Ok(t.versions
            .iter()
            .find(|v| v.id == row.version_id && (v.status == "pending" || v.status == "rejected"))
            .cloned())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.tables().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(self.category(id))
    }

    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category> {
        self.record_write();
        let mut t = self.tables();
        if t.categories.iter().any(|c| c.name == input.name) {
            return Err(StoreError::Conflict(
                "Duplicate value violates unique constraint: uq_categories_name".into(),
            ));
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            parent_category_id: input.parent_category_id,
            default_visibility: input
                .default_visibility
                .clone()
                .unwrap_or_else(|| "public".to_string()),
            created_at: Utc::now(),
        };
        t.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>> {
        self.record_write();
        let mut t = self.tables();
        let Some(category) = t.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(ref name) = input.name {
            category.name = name.clone();
        }
        if input.clear_parent {
            category.parent_category_id = None;
        } else if let Some(parent) = input.parent_category_id {
            category.parent_category_id = Some(parent);
        }
        if let Some(ref visibility) = input.default_visibility {
            category.default_visibility = visibility.clone();
        }
        Ok(Some(category.clone()))
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<bool> {
        self.record_write();
        let mut t = self.tables();
        if t.articles.iter().any(|a| a.category_id == id) {
            return Err(StoreError::Conflict(
                "The operation conflicts with a related record".into(),
            ));
        }
        let before = t.categories.len();
        t.categories.retain(|c| c.id != id);
        for child in t.categories.iter_mut().filter(|c| c.parent_category_id == Some(id)) {
            child.parent_category_id = None;
        }
        Ok(t.categories.len() < before)
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        preview_token_ttl_hours: 72,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over the given store.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        catalog: Arc::new(GameCatalog::load_embedded().expect("embedded catalog must load")),
    };
    build_app_router(state, &config)
}

/// A valid bearer token for the given user id.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("serialize body"))
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).expect("build request"))
        .await
        .expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST with no body at all.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Read and parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Assert the status and return the parsed body.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
