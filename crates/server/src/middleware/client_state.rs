//! Anonymous client identity extractor.
//!
//! Resolves the caller's [`ClientIdentity`] from the identity cookie, minting
//! and persisting a fresh one when the cookie is missing or empty, and hands
//! the handler a [`CookieStore`] over the same request's cookies.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use tracing::Span;

use cookie_tickets_core::ClientIdentity;

use crate::state::AppState;
use crate::store::CookieStore;

/// Extractor for the calling client's identity and cookie-backed store.
///
/// Never rejects: a request without an identity is given a new one.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(client: ClientState) -> impl IntoResponse {
///     let tickets = list_tickets(&client.store, &client.identity);
///     (client.into_jar(), format!("{tickets:?}"))
/// }
/// ```
#[derive(Debug)]
pub struct ClientState {
    /// The resolved identity for this request.
    pub identity: ClientIdentity,
    /// Collection storage over this request's cookies.
    pub store: CookieStore,
}

impl ClientState {
    /// Resolve the identity from a request's cookies.
    ///
    /// A newly minted identity is queued on the jar as a `Set-Cookie`.
    #[must_use]
    pub fn resolve(jar: CookieJar, state: &AppState) -> Self {
        let mut store = CookieStore::new(jar, state.cookies().clone(), state.malformed_state());

        let resolution = ClientIdentity::resolve(store.presented_identity().as_deref());
        if resolution.should_persist {
            tracing::debug!(identity = %resolution.identity, "Issued new client identity");
            store.persist_identity(&resolution.identity);
        }

        Self {
            identity: resolution.identity,
            store,
        }
    }

    /// Give up the cookie jar so pending cookies reach the response.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.store.into_jar()
    }
}

impl FromRequestParts<AppState> for ClientState {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let client = Self::resolve(jar, state);

        Span::current().record("client_id", client.identity.as_str());

        Ok(client)
    }
}
