//! Repository for the `users` table.

use codex_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nickname, role, password_hash, created_at";

/// Provides user lookups. Accounts are provisioned by the auth provider.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by nickname (case-sensitive).
    pub async fn find_by_nickname(
        pool: &PgPool,
        nickname: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE nickname = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(nickname)
            .fetch_optional(pool)
            .await
    }
}
