//! Chronos Web API
//!
//! Axum-based REST API serving year-in-review reports, plus an optional
//! static file server for the presentation layer.

mod handlers;
mod routes;

pub use routes::create_router;

use chronos_cache::CacheBackend;
use chronos_collector::github::GithubCollector;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub cache: CacheBackend,
    pub collector: GithubCollector,
}

impl AppState {
    pub fn new(cache: CacheBackend, collector: GithubCollector) -> Self {
        Self { cache, collector }
    }
}

pub type SharedState = Arc<AppState>;
