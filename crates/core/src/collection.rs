//! A client's ticket collection.
//!
//! The collection is an ordered list of tickets owned entirely by one client
//! identity. All operations are in-memory transforms; loading and saving the
//! collection is the job of a [`CollectionStore`](crate::CollectionStore).
//!
//! # Id Assignment
//!
//! New tickets receive the highest id currently in the collection plus one,
//! or `1` when the collection is empty. Ids are never supplied by clients.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Ticket, TicketDraft, TicketId};

/// Errors raised by collection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// No ticket with the requested id exists in the collection.
    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),

    /// The highest id in the collection is `i32::MAX`.
    #[error("ticket id space exhausted")]
    IdExhausted,
}

/// Ordered sequence of tickets belonging to one client.
///
/// Serializes as a bare JSON array of [`Ticket`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketCollection(Vec<Ticket>);

impl TicketCollection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Decode a collection from its stored JSON form.
    ///
    /// A blank blob or JSON `null` decodes to an empty collection.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the blob is not a JSON array of tickets.
    pub fn from_blob(blob: &str) -> Result<Self, serde_json::Error> {
        if blob.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_json::from_str::<Option<Self>>(blob).map(Option::unwrap_or_default)
    }

    /// Encode the whole collection to its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The id the next added ticket will receive.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IdExhausted`] if the highest id is `i32::MAX`.
    pub fn next_id(&self) -> Result<TicketId, CollectionError> {
        match self.0.iter().map(|ticket| ticket.id).max() {
            Some(max) => max.checked_next().ok_or(CollectionError::IdExhausted),
            None => Ok(TicketId::FIRST),
        }
    }

    /// Append a new ticket built from `draft` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IdExhausted`] if no further id can be assigned.
    pub fn add(&mut self, draft: TicketDraft) -> Result<Ticket, CollectionError> {
        let ticket = draft.into_ticket(self.next_id()?);
        self.0.push(ticket.clone());
        Ok(ticket)
    }

    /// Overwrite the name and price of the first ticket with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TicketNotFound`] and leaves the collection
    /// untouched if no ticket has that id.
    pub fn update(&mut self, id: TicketId, draft: TicketDraft) -> Result<Ticket, CollectionError> {
        let ticket = self
            .0
            .iter_mut()
            .find(|ticket| ticket.id == id)
            .ok_or(CollectionError::TicketNotFound(id))?;

        ticket.event_name = draft.event_name;
        ticket.price = draft.price;
        Ok(ticket.clone())
    }

    /// Remove the first ticket with `id` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TicketNotFound`] and leaves the collection
    /// untouched if no ticket has that id.
    pub fn remove(&mut self, id: TicketId) -> Result<Ticket, CollectionError> {
        let position = self
            .0
            .iter()
            .position(|ticket| ticket.id == id)
            .ok_or(CollectionError::TicketNotFound(id))?;
        Ok(self.0.remove(position))
    }

    /// Find the first ticket with `id`.
    #[must_use]
    pub fn get(&self, id: TicketId) -> Option<&Ticket> {
        self.0.iter().find(|ticket| ticket.id == id)
    }

    /// Iterate over tickets in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Ticket> {
        self.0.iter()
    }

    /// Number of tickets.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection holds no tickets.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Ticket>> for TicketCollection {
    fn from(tickets: Vec<Ticket>) -> Self {
        Self(tickets)
    }
}

impl<'a> IntoIterator for &'a TicketCollection {
    type Item = &'a Ticket;
    type IntoIter = std::slice::Iter<'a, Ticket>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
