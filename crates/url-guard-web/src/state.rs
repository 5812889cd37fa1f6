//! Application state.

use std::sync::Arc;

use url_guard_core::UrlAnalyzer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn UrlAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: Arc<dyn UrlAnalyzer>) -> Self {
        Self { analyzer }
    }
}
