//! Storage seam for ticket collections.
//!
//! A store maps a [`ClientIdentity`] to exactly one serialized
//! [`TicketCollection`]. Every load and save moves the whole collection; there
//! are no partial updates, transactions, or locks.

use thiserror::Error;

use crate::collection::TicketCollection;
use crate::types::ClientIdentity;

/// Errors raised while loading or saving a collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored blob exists but is not a valid ticket collection.
    #[error("stored collection in {slot} is malformed: {source}")]
    Malformed {
        /// Name of the slot holding the blob.
        slot: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be serialized.
    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Identity-keyed storage for ticket collections.
///
/// Implementations must treat a missing or empty slot as an empty collection
/// and must never expose one identity's collection under another's key.
pub trait CollectionStore {
    /// Load the collection owned by `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Malformed`] if a stored blob cannot be decoded.
    fn load(&self, identity: &ClientIdentity) -> Result<TicketCollection, StoreError>;

    /// Replace the collection owned by `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] if the collection cannot be serialized.
    fn save(
        &mut self,
        identity: &ClientIdentity,
        tickets: &TicketCollection,
    ) -> Result<(), StoreError>;
}
