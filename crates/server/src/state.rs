//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{CookieConfig, MalformedStatePolicy, TicketsConfig};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds configuration only:
/// every client's tickets travel with the client's own cookies.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: TicketsConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: TicketsConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &TicketsConfig {
        &self.inner.config
    }

    /// Get a reference to the client-state cookie settings.
    #[must_use]
    pub fn cookies(&self) -> &CookieConfig {
        &self.inner.config.cookies
    }

    /// Handling of undecodable collection cookies.
    #[must_use]
    pub fn malformed_state(&self) -> MalformedStatePolicy {
        self.inner.config.malformed_state
    }
}
