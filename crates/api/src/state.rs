use std::sync::Arc;

use codex_core::gamedata::GameCatalog;
use codex_db::store::DynContentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The system of record (PostgreSQL in production).
    pub store: DynContentStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Static game reference data, parsed once at startup.
    pub catalog: Arc<GameCatalog>,
}
