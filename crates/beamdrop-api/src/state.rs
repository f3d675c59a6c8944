//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use beamdrop_core::config::AppConfig;
use beamdrop_realtime::RelayEngine;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// WebSocket relay engine
    pub engine: Arc<RelayEngine>,
}

impl AppState {
    /// Creates state from configuration and the relay engine.
    pub fn new(config: Arc<AppConfig>, engine: Arc<RelayEngine>) -> Self {
        Self { config, engine }
    }
}
