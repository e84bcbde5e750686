//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. State transitions go through the named
//! database functions; repositories never update a version's status directly.

pub mod article_repo;
pub mod article_version_repo;
pub mod category_repo;
pub mod preview_token_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use article_version_repo::ArticleVersionRepo;
pub use category_repo::CategoryRepo;
pub use preview_token_repo::PreviewTokenRepo;
pub use user_repo::UserRepo;
