//! Core types for Cookie Tickets.
//!
//! This module provides type-safe wrappers for the service's domain concepts.

pub mod id;
pub mod identity;
pub mod ticket;

pub use id::*;
pub use identity::{ClientIdentity, IdentityError, Resolution};
pub use ticket::{Ticket, TicketDraft};
