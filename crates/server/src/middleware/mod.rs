//! HTTP middleware stack for the ticket service.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with `request_id` and `client_id` fields)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (nosniff, frame denial, no-store)
//!
//! Client identity is resolved per handler by the [`ClientState`] extractor.

pub mod client_state;
pub mod request_id;
pub mod security_headers;

pub use client_state::ClientState;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
