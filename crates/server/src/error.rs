//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Ticket handlers produce `Result<T, AppError>`.

use axum::{
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::Cookie;
use thiserror::Error;

use cookie_tickets_core::{CollectionError, StoreError, TicketError, TicketId};

/// Application-level error type for the ticket service.
#[derive(Debug, Error)]
pub enum AppError {
    /// The requested ticket is not in the client's collection.
    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketId),

    /// The client's collection cookie does not decode.
    #[error("Malformed stored state in {slot}: {source}")]
    MalformedStoredState {
        /// Name of the offending cookie.
        slot: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The request conflicts with the stored state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TicketError> for AppError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::Collection(CollectionError::TicketNotFound(id)) => Self::TicketNotFound(id),
            TicketError::Collection(err @ CollectionError::IdExhausted) => {
                Self::Conflict(err.to_string())
            }
            TicketError::Store(StoreError::Malformed { slot, source }) => {
                Self::MalformedStoredState { slot, source }
            }
            TicketError::Store(err @ StoreError::Encode(_)) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::TicketNotFound(_) => StatusCode::NOT_FOUND,
            Self::MalformedStoredState { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::TicketNotFound(_) => "Ticket not found".to_string(),
            Self::MalformedStoredState { .. } => "Stored ticket list is malformed".to_string(),
            Self::Conflict(msg) => msg.clone(),
            Self::Internal(_) => "Internal server error".to_string(),
        };

        let mut response = (status, message).into_response();

        // Expire the corrupt cookie so the client's next request starts empty
        if let Self::MalformedStoredState { slot, source } = &self {
            tracing::warn!(%slot, error = %source, "Rejected malformed ticket collection");
            if let Some(value) = removal_header(slot) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }

        response
    }
}

/// Build a `Set-Cookie` header value that deletes the cookie named `name`.
fn removal_header(name: &str) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((name.to_owned(), "")).path("/").build();
    cookie.make_removal();
    HeaderValue::from_str(&cookie.encoded().to_string()).ok()
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for client actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("tickets", "Added ticket", Some(&[("ticket_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn malformed(slot: &str) -> AppError {
        let source = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        AppError::MalformedStoredState {
            slot: slot.to_string(),
            source,
        }
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::TicketNotFound(TicketId::new(99));
        assert_eq!(err.to_string(), "Ticket not found: 99");

        let err = AppError::Conflict("ticket id space exhausted".to_string());
        assert_eq!(err.to_string(), "Conflict: ticket id space exhausted");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::TicketNotFound(TicketId::new(1))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status(malformed("TicketsList_a")), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(AppError::Conflict("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_ticket_error() {
        let err = AppError::from(TicketError::Collection(CollectionError::TicketNotFound(
            TicketId::new(4),
        )));
        assert!(matches!(err, AppError::TicketNotFound(id) if id == TicketId::new(4)));

        let err = AppError::from(TicketError::Collection(CollectionError::IdExhausted));
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_malformed_state_expires_cookie() {
        let response = malformed("TicketsList_abc").into_response();
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();

        assert!(set_cookie.starts_with("TicketsList_abc=;"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
