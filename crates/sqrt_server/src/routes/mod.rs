//! Route modules for the sqrt server
//!
//! This module contains endpoint group-specific routers:
//! - index: the demo HTML form
//! - sqrt: the JSON computation endpoint (with CSV download)
//! - health: health check and monitoring endpoints

pub mod health;
pub mod index;
pub mod sqrt;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    let state = AppState::new(config);

    Router::new()
        .merge(index::routes())
        .merge(health::routes())
        .merge(sqrt::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
