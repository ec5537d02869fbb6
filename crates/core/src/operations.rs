//! Ticket operations as load-transform-save flows over a [`CollectionStore`].
//!
//! Each operation loads the caller's whole collection, applies one
//! [`TicketCollection`] transform, and saves the result only if the transform
//! succeeded. Failed operations never write.

use thiserror::Error;

use crate::collection::{CollectionError, TicketCollection};
use crate::store::{CollectionStore, StoreError};
use crate::types::{ClientIdentity, Ticket, TicketDraft, TicketId};

/// Errors raised by ticket operations.
#[derive(Debug, Error)]
pub enum TicketError {
    /// The transform itself failed.
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// Loading or saving the collection failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Return the caller's collection unchanged.
///
/// # Errors
///
/// Returns [`TicketError::Store`] if the stored collection cannot be loaded.
pub fn list_tickets<S>(store: &S, identity: &ClientIdentity) -> Result<TicketCollection, TicketError>
where
    S: CollectionStore + ?Sized,
{
    Ok(store.load(identity)?)
}

/// Add a ticket with the next free id and return it.
///
/// # Errors
///
/// Returns [`TicketError::Store`] on load or save failure and
/// [`TicketError::Collection`] if no id can be assigned.
pub fn add_ticket<S>(
    store: &mut S,
    identity: &ClientIdentity,
    draft: TicketDraft,
) -> Result<Ticket, TicketError>
where
    S: CollectionStore + ?Sized,
{
    let mut tickets = store.load(identity)?;
    let ticket = tickets.add(draft)?;
    store.save(identity, &tickets)?;
    Ok(ticket)
}

/// Overwrite the name and price of ticket `id` and return it.
///
/// # Errors
///
/// Returns [`TicketError::Collection`] if `id` is not in the collection and
/// [`TicketError::Store`] on load or save failure.
pub fn update_ticket<S>(
    store: &mut S,
    identity: &ClientIdentity,
    id: TicketId,
    draft: TicketDraft,
) -> Result<Ticket, TicketError>
where
    S: CollectionStore + ?Sized,
{
    let mut tickets = store.load(identity)?;
    let ticket = tickets.update(id, draft)?;
    store.save(identity, &tickets)?;
    Ok(ticket)
}

/// Remove ticket `id`.
///
/// # Errors
///
/// Returns [`TicketError::Collection`] if `id` is not in the collection and
/// [`TicketError::Store`] on load or save failure.
pub fn delete_ticket<S>(
    store: &mut S,
    identity: &ClientIdentity,
    id: TicketId,
) -> Result<(), TicketError>
where
    S: CollectionStore + ?Sized,
{
    let mut tickets = store.load(identity)?;
    tickets.remove(id)?;
    store.save(identity, &tickets)?;
    Ok(())
}
