//! Ticket records.

use serde::{Deserialize, Serialize};

use super::id::TicketId;

/// A stored ticket.
///
/// Serialized as `{"id": 1, "eventName": "Concert", "price": 50}`. The
/// `PascalCase` field names written by earlier clients are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Assigned by the server, unique within one client's collection.
    #[serde(alias = "Id")]
    pub id: TicketId,
    /// Name of the event.
    #[serde(alias = "EventName")]
    pub event_name: String,
    /// Ticket price.
    #[serde(alias = "Price")]
    pub price: i32,
}

/// Client-supplied ticket fields for add and update.
///
/// Any `id` in the request body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    /// Name of the event.
    #[serde(alias = "EventName")]
    pub event_name: String,
    /// Ticket price.
    #[serde(alias = "Price")]
    pub price: i32,
}

impl TicketDraft {
    /// Create a draft.
    #[must_use]
    pub fn new(event_name: impl Into<String>, price: i32) -> Self {
        Self {
            event_name: event_name.into(),
            price,
        }
    }

    /// Materialize the draft as a ticket with the given id.
    #[must_use]
    pub fn into_ticket(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            event_name: self.event_name,
            price: self.price,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_json_shape() {
        let ticket = TicketDraft::new("Concert", 50).into_ticket(TicketId::new(1));
        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "eventName": "Concert", "price": 50})
        );
    }

    #[test]
    fn test_draft_ignores_id() {
        let draft: TicketDraft =
            serde_json::from_str(r#"{"id": 7, "eventName": "Movie", "price": 10}"#).unwrap();
        assert_eq!(draft, TicketDraft::new("Movie", 10));
    }

    #[test]
    fn test_ticket_accepts_pascal_case() {
        let ticket: Ticket =
            serde_json::from_str(r#"{"Id": 3, "EventName": "Opera", "Price": 80}"#).unwrap();
        assert_eq!(ticket.id, TicketId::new(3));
        assert_eq!(ticket.event_name, "Opera");
        assert_eq!(ticket.price, 80);
    }

    #[test]
    fn test_draft_requires_fields() {
        assert!(serde_json::from_str::<TicketDraft>(r#"{"eventName": "Movie"}"#).is_err());
        assert!(serde_json::from_str::<TicketDraft>(r#"{"price": 10}"#).is_err());
    }
}
