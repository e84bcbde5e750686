//! Codex API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes) so the
//! binary entrypoint and the integration tests assemble the same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
