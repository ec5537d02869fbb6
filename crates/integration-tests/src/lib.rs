//! Integration tests for Cookie Tickets.
//!
//! Each test starts the ticket service in-process on an ephemeral port and
//! talks to it over real HTTP, so cookies travel through an actual client
//! cookie store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cookie-tickets-integration-tests
//! ```

use std::net::SocketAddr;

use cookie_tickets_server::config::TicketsConfig;
use cookie_tickets_server::state::AppState;
use reqwest::Client;
use tokio::net::TcpListener;

/// A running server plus a helper for building clients against it.
pub struct TestContext {
    /// Base URL of the running server, without a trailing slash.
    pub base_url: String,
    /// Client with its own cookie store.
    pub client: Client,
}

impl TestContext {
    /// Start a server with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn new() -> Self {
        Self::with_config(TicketsConfig::default()).await
    }

    /// Start a server with the given configuration.
    ///
    /// The configured host and port are ignored; the server always binds
    /// `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn with_config(config: TicketsConfig) -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let app = cookie_tickets_server::app(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Self::new_client(),
        }
    }

    /// Build another client with an independent cookie store.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new_client() -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
