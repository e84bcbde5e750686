//! Seeding helpers shared by the database integration tests.

#![allow(dead_code)]

use codex_core::types::DbId;
use codex_db::models::article::{Article, CreateArticle};
use codex_db::models::article_version::{ArticleVersion, CreateArticleVersion};
use codex_db::models::category::{Category, CreateCategory};
use codex_db::store::{ContentStore, PgStore};
use sqlx::PgPool;

/// Insert a user directly; accounts are otherwise provisioned externally.
pub async fn insert_user(pool: &PgPool, nickname: &str, role: &str) -> DbId {
    let (id,): (DbId,) =
        sqlx::query_as("INSERT INTO users (nickname, role) VALUES ($1, $2) RETURNING id")
            .bind(nickname)
            .bind(role)
            .fetch_one(pool)
            .await
            .unwrap();
    id
}

pub async fn insert_category(store: &PgStore, name: &str, parent: Option<DbId>) -> Category {
    store
        .create_category(&CreateCategory {
            name: name.to_string(),
            parent_category_id: parent,
            default_visibility: None,
        })
        .await
        .unwrap()
}

/// Create an article and its first pending version, the way submission does.
pub async fn submit(
    store: &PgStore,
    author_id: DbId,
    category_id: DbId,
    title: &str,
) -> (Article, ArticleVersion) {
    let article = store
        .create_article(&CreateArticle {
            title: title.to_string(),
            author_id,
            category_id,
        })
        .await
        .unwrap();
    let version = store
        .submit_version(&CreateArticleVersion {
            article_id: article.id,
            editor_id: author_id,
            title: title.to_string(),
            content: format!("Body of {title}"),
            category_id,
        })
        .await
        .unwrap();
    (article, version)
}
