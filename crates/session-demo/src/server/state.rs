//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use securetoken::Tokener;

/// Application state shared across all request handlers.
///
/// Cloning is cheap: the tokener shares its cipher and collaborators, the
/// cookie name is `Arc`-wrapped.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Seals and unseals session cookies.
    pub tokener: Tokener,
    /// Name of the session cookie.
    pub cookie_name: Arc<String>,
}

impl AppState {
    pub fn new(tokener: Tokener, cookie_name: String) -> Self {
        Self {
            tokener,
            cookie_name: Arc::new(cookie_name),
        }
    }
}
