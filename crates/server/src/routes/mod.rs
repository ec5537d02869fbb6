//! HTTP route handlers for the ticket service.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Liveness check
//!
//! # Tickets (JSON)
//! GET    /tickets              - List the client's tickets
//! POST   /tickets              - Add a ticket
//! PUT    /tickets/{id}         - Update a ticket's name and price
//! DELETE /tickets/{id}         - Delete a ticket
//! ```
//!
//! The ticket routes are also mounted under `/api/ticket`. Both collection
//! paths also answer with a trailing slash.

pub mod tickets;

use axum::{
    Router,
    routing::{MethodRouter, get, put},
};

use crate::state::AppState;

/// Create the ticket routes router.
pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/", collection_methods())
        .route("/{id}", put(tickets::update).delete(tickets::destroy))
}

/// List and add, served on the collection path.
fn collection_methods() -> MethodRouter<AppState> {
    get(tickets::index).post(tickets::create)
}

/// Create all routes for the ticket service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/tickets", ticket_routes())
        .route("/tickets/", collection_methods())
        .nest("/api/ticket", ticket_routes())
        .route("/api/ticket/", collection_methods())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. The service has no dependencies to
/// check.
async fn health() -> &'static str {
    "ok"
}
