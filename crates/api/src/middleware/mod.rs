//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a JWT Bearer token.
//! - [`rbac::RequireModerator`] -- Requires the `reviewer` or `coordinator` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;
