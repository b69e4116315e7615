//! Data models for authorgraph.
//!
//! This module contains all the core data structures used throughout the system.

mod author;
mod connection;
mod modal;

pub use author::{AuthorKey, AuthorRecord, CategoryRecord};
pub use connection::Connection;
pub use modal::{BioState, DomainBadge, DomainKind, ModalState, OpenModal};
