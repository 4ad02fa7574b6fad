use std::sync::Arc;

use bistro_db::Stores;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (every store is behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document stores, injected at startup.
    pub stores: Stores,
    /// Server configuration (token secret, bcrypt cost, ...).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(stores: Stores, config: ServerConfig) -> Self {
        Self {
            stores,
            config: Arc::new(config),
        }
    }
}
