//! Ticket route handlers.
//!
//! Every handler resolves the client identity, loads the client's collection
//! from its cookie, applies one operation, and writes the collection back.
//! The cookie jar is returned alongside the outcome so a newly issued
//! identity reaches the client even when the operation fails.

use axum::{Json, extract::Path, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use cookie_tickets_core::{
    Ticket, TicketCollection, TicketDraft, TicketId,
    operations::{add_ticket, delete_ticket, list_tickets, update_ticket},
};

use crate::error::{Result, add_breadcrumb};
use crate::middleware::ClientState;

/// List the client's tickets.
#[instrument(skip(client), fields(client_id = %client.identity))]
pub async fn index(client: ClientState) -> (CookieJar, Result<Json<TicketCollection>>) {
    let result = list_tickets(&client.store, &client.identity)
        .map(Json)
        .map_err(Into::into);

    (client.into_jar(), result)
}

/// Add a ticket. Any `id` in the body is ignored.
#[instrument(skip(client, draft), fields(client_id = %client.identity))]
pub async fn create(
    mut client: ClientState,
    Json(draft): Json<TicketDraft>,
) -> (CookieJar, Result<Json<Ticket>>) {
    let result = add_ticket(&mut client.store, &client.identity, draft)
        .inspect(|ticket| {
            tracing::info!(ticket_id = %ticket.id, "Ticket added");
            add_breadcrumb(
                "tickets",
                "Added ticket",
                Some(&[("ticket_id", ticket.id.to_string().as_str())]),
            );
        })
        .map(Json)
        .map_err(Into::into);

    (client.into_jar(), result)
}

/// Replace the event name and price of ticket `id`.
#[instrument(skip(client, draft), fields(client_id = %client.identity))]
pub async fn update(
    mut client: ClientState,
    Path(id): Path<i32>,
    Json(draft): Json<TicketDraft>,
) -> (CookieJar, Result<Json<Ticket>>) {
    let result = update_ticket(&mut client.store, &client.identity, TicketId::new(id), draft)
        .inspect(|ticket| {
            tracing::info!(ticket_id = %ticket.id, "Ticket updated");
            add_breadcrumb(
                "tickets",
                "Updated ticket",
                Some(&[("ticket_id", ticket.id.to_string().as_str())]),
            );
        })
        .map(Json)
        .map_err(Into::into);

    (client.into_jar(), result)
}

/// Delete ticket `id`.
#[instrument(skip(client), fields(client_id = %client.identity))]
pub async fn destroy(
    mut client: ClientState,
    Path(id): Path<i32>,
) -> (CookieJar, Result<StatusCode>) {
    let result = delete_ticket(&mut client.store, &client.identity, TicketId::new(id))
        .map(|()| {
            tracing::info!(ticket_id = id, "Ticket deleted");
            add_breadcrumb(
                "tickets",
                "Deleted ticket",
                Some(&[("ticket_id", id.to_string().as_str())]),
            );
            StatusCode::NO_CONTENT
        })
        .map_err(Into::into);

    (client.into_jar(), result)
}
