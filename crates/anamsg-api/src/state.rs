//! # Application State
//!
//! Shared state for the Axum application. The service is stateless apart
//! from its operational defaults; handlers call straight into the codec
//! and crypto crates.

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search bound used when a recovery request does not name one.
    pub default_search_bound: u64,
}

impl AppState {
    /// State with the stock defaults.
    pub fn new() -> Self {
        Self {
            default_search_bound: 1000,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
