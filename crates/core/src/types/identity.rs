//! Anonymous client identity.
//!
//! A [`ClientIdentity`] is an opaque bearer token. The server never records
//! which identities it issued: any non-empty token a client presents is
//! accepted as-is and names that client's ticket collection.

use core::fmt;

use uuid::Uuid;

/// Errors that can occur when parsing a [`ClientIdentity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The presented token is empty.
    #[error("client identity cannot be empty")]
    Empty,
}

/// An opaque per-client identity token.
///
/// Freshly minted identities are hyphenated UUID v4 strings. Identities read
/// back from a client are not checked for that shape.
///
/// ## Examples
///
/// ```
/// use cookie_tickets_core::ClientIdentity;
///
/// let identity = ClientIdentity::parse("3f2b9c1e-client").unwrap();
/// assert_eq!(identity.collection_slot("TicketsList"), "TicketsList_3f2b9c1e-client");
///
/// assert!(ClientIdentity::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    /// Mint a new random identity.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept a token presented by a client.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Empty`] if the token is empty.
    pub fn parse(token: &str) -> Result<Self, IdentityError> {
        if token.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(token.to_owned()))
    }

    /// Resolve the identity for a request.
    ///
    /// A present, non-empty token is reused unchanged. Otherwise a fresh
    /// identity is minted and the caller must persist it back to the client.
    #[must_use]
    pub fn resolve(incoming: Option<&str>) -> Resolution {
        match incoming.map(Self::parse) {
            Some(Ok(identity)) => Resolution {
                identity,
                should_persist: false,
            },
            _ => Resolution {
                identity: Self::generate(),
                should_persist: true,
            },
        }
    }

    /// Name of the storage slot holding this identity's collection.
    #[must_use]
    pub fn collection_slot(&self, prefix: &str) -> String {
        format!("{prefix}_{}", self.0)
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of [`ClientIdentity::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The identity to use for this request.
    pub identity: ClientIdentity,
    /// Whether the identity was minted and must be written back to the client.
    pub should_persist: bool,
}
