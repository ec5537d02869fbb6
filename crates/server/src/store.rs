//! Cookie-backed ticket storage.
//!
//! Each client's collection lives in a single cookie named
//! `{prefix}_{identity}` holding the JSON array of tickets. The server keeps
//! no copy: a request carries the current collection in, and the response
//! carries the replacement out.
//!
//! Cookie values are percent-encoded on write and decoded on read by
//! `axum_extra`'s cookie jar.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::{Duration, OffsetDateTime};

use cookie_tickets_core::{ClientIdentity, CollectionStore, StoreError, TicketCollection};

use crate::config::{CookieConfig, MalformedStatePolicy};

/// A [`CollectionStore`] over the cookies of one request/response exchange.
#[derive(Debug)]
pub struct CookieStore {
    jar: CookieJar,
    cookies: CookieConfig,
    malformed_state: MalformedStatePolicy,
}

impl CookieStore {
    /// Wrap the cookies a client sent.
    #[must_use]
    pub const fn new(
        jar: CookieJar,
        cookies: CookieConfig,
        malformed_state: MalformedStatePolicy,
    ) -> Self {
        Self {
            jar,
            cookies,
            malformed_state,
        }
    }

    /// The identity token the client presented, if any.
    #[must_use]
    pub fn presented_identity(&self) -> Option<String> {
        self.jar
            .get(&self.cookies.identity_name)
            .map(|cookie| cookie.value().to_owned())
    }

    /// Write `identity` back to the client.
    pub fn persist_identity(&mut self, identity: &ClientIdentity) {
        let cookie = self.state_cookie(
            self.cookies.identity_name.clone(),
            identity.as_str().to_owned(),
        );
        self.add(cookie);
    }

    /// Give up the jar so its changes can be sent as `Set-Cookie` headers.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    /// Build a cookie carrying client state under the shared cookie policy.
    fn state_cookie(&self, name: String, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(false)
            .secure(self.cookies.secure)
            .expires(OffsetDateTime::now_utc() + Duration::days(self.cookies.ttl_days))
            .build()
    }

    fn add(&mut self, cookie: Cookie<'static>) {
        let jar = std::mem::replace(&mut self.jar, CookieJar::new());
        self.jar = jar.add(cookie);
    }
}

impl CollectionStore for CookieStore {
    fn load(&self, identity: &ClientIdentity) -> Result<TicketCollection, StoreError> {
        let slot = identity.collection_slot(&self.cookies.collection_prefix);
        let Some(cookie) = self.jar.get(&slot) else {
            return Ok(TicketCollection::new());
        };

        match TicketCollection::from_blob(cookie.value()) {
            Ok(tickets) => Ok(tickets),
            Err(source) => match self.malformed_state {
                MalformedStatePolicy::Reject => Err(StoreError::Malformed { slot, source }),
                MalformedStatePolicy::Discard => {
                    tracing::warn!(%slot, error = %source, "Discarding malformed ticket collection");
                    Ok(TicketCollection::new())
                }
            },
        }
    }

    fn save(
        &mut self,
        identity: &ClientIdentity,
        tickets: &TicketCollection,
    ) -> Result<(), StoreError> {
        let slot = identity.collection_slot(&self.cookies.collection_prefix);
        let blob = tickets.to_blob().map_err(StoreError::Encode)?;
        let cookie = self.state_cookie(slot, blob);
        self.add(cookie);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
    use cookie_tickets_core::{TicketDraft, TicketId};

    use super::*;

    fn store_with(header: Option<&str>, policy: MalformedStatePolicy) -> CookieStore {
        let mut headers = HeaderMap::new();
        if let Some(value) = header {
            headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        }
        CookieStore::new(CookieJar::from_headers(&headers), CookieConfig::default(), policy)
    }

    fn identity(token: &str) -> ClientIdentity {
        ClientIdentity::parse(token).unwrap()
    }

    fn sample() -> TicketCollection {
        TicketCollection::from(vec![
            TicketDraft::new("Concert", 50).into_ticket(TicketId::new(1)),
            TicketDraft::new("Movie; \"late\", 3D", 10).into_ticket(TicketId::new(2)),
        ])
    }

    #[test]
    fn test_missing_cookie_is_empty_collection() {
        let store = store_with(None, MalformedStatePolicy::Reject);
        assert!(store.load(&identity("abc")).unwrap().is_empty());
    }

    #[test]
    fn test_empty_cookie_is_empty_collection() {
        let store = store_with(Some("TicketsList_abc="), MalformedStatePolicy::Reject);
        assert!(store.load(&identity("abc")).unwrap().is_empty());
    }

    #[test]
    fn test_load_after_save_returns_same_collection() {
        let mut store = store_with(None, MalformedStatePolicy::Reject);
        let owner = identity("owner");

        store.save(&owner, &sample()).unwrap();
        assert_eq!(store.load(&owner).unwrap(), sample());
    }

    #[test]
    fn test_save_does_not_leak_across_identities() {
        let mut store = store_with(None, MalformedStatePolicy::Reject);
        store.save(&identity("bob"), &sample()).unwrap();

        assert!(store.load(&identity("alice")).unwrap().is_empty());
    }

    #[test]
    fn test_reads_percent_encoded_cookie() {
        let mut writer = store_with(None, MalformedStatePolicy::Reject);
        writer.save(&identity("abc"), &sample()).unwrap();
        let set_cookie = writer
            .into_jar()
            .get("TicketsList_abc")
            .unwrap()
            .encoded()
            .to_string();
        let pair = set_cookie.split(';').next().unwrap();
        assert!(!pair.contains('"'));

        let reader = store_with(Some(pair), MalformedStatePolicy::Reject);
        assert_eq!(reader.load(&identity("abc")).unwrap(), sample());
    }

    #[test]
    fn test_malformed_cookie_rejected() {
        let store = store_with(Some("TicketsList_abc=garbage"), MalformedStatePolicy::Reject);
        match store.load(&identity("abc")) {
            Err(StoreError::Malformed { slot, .. }) => assert_eq!(slot, "TicketsList_abc"),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_cookie_discarded() {
        let store = store_with(Some("TicketsList_abc=garbage"), MalformedStatePolicy::Discard);
        assert!(store.load(&identity("abc")).unwrap().is_empty());
    }

    #[test]
    fn test_presented_identity() {
        let store = store_with(Some("UserGUID=token-1; other=x"), MalformedStatePolicy::Reject);
        assert_eq!(store.presented_identity().as_deref(), Some("token-1"));

        let store = store_with(None, MalformedStatePolicy::Reject);
        assert_eq!(store.presented_identity(), None);
    }

    #[test]
    fn test_written_cookies_follow_policy() {
        let mut store = store_with(None, MalformedStatePolicy::Reject);
        let owner = identity("owner");
        store.persist_identity(&owner);
        store.save(&owner, &sample()).unwrap();

        let jar = store.into_jar();
        for name in ["UserGUID", "TicketsList_owner"] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.http_only(), Some(false));
            assert_eq!(cookie.secure(), Some(false));

            let expires = cookie.expires_datetime().unwrap();
            let remaining = expires - OffsetDateTime::now_utc();
            assert!(remaining > Duration::days(6) && remaining <= Duration::days(7));
        }
        assert_eq!(jar.get("UserGUID").unwrap().value(), "owner");
    }
}
