//! Cookie Tickets Core - Shared types and ticket operations.
//!
//! This crate provides the domain of the Cookie Tickets service:
//! - anonymous client identities and how they are resolved
//! - tickets and the per-client ticket collection
//! - the storage seam a collection is loaded from and saved to
//!
//! # Architecture
//!
//! The core crate contains only types, traits, and pure logic - no I/O, no
//! HTTP, no cookies. The server crate supplies the cookie-backed
//! [`CollectionStore`] and maps the errors defined here to HTTP responses.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, client identities, and tickets
//! - [`collection`] - The ordered ticket collection and its operations
//! - [`store`] - The `CollectionStore` trait
//! - [`operations`] - List/add/update/delete as load-transform-save flows

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod operations;
pub mod store;
pub mod types;

pub use collection::{CollectionError, TicketCollection};
pub use operations::TicketError;
pub use store::{CollectionStore, StoreError};
pub use types::*;
