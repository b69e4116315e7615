//! # Authorgraph
//!
//! Relatedness scoring and biography loading core for the bridge-authors
//! explorer.
//!
//! Authorgraph takes two loaded datasets (author records and per-author
//! topical categories), ranks every author against a subject by shared
//! domains, and drives a small state machine that fetches, truncates, and
//! session-caches Wikipedia biography summaries. Rendering is someone else's
//! job: a presentation layer subscribes to [`ModalState`] changes and draws
//! whatever the core resolves.
//!
//! ## Example
//!
//! ```rust,ignore
//! use authorgraph::{AuthorStore, BioCache, ModalController, WikipediaClient};
//! use std::sync::Arc;
//!
//! let store = Arc::new(AuthorStore::from_json(&authors_json, &categories_json)?);
//! let controller = ModalController::new(
//!     store,
//!     BioCache::in_memory(),
//!     Arc::new(WikipediaClient::new()),
//! );
//! let modal = controller.open("euler")?;
//! controller.load_biography().await;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cache;
pub mod config;
pub mod fetch;
pub mod models;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use cache::{BioCache, MemorySessionStore, SessionStore};
pub use config::AuthorgraphConfig;
pub use fetch::{BIO_CHAR_BUDGET, BioFetcher, WikipediaClient, truncate_extract};
pub use models::{
    AuthorKey, AuthorRecord, BioState, CategoryRecord, Connection, DomainBadge, DomainKind,
    ModalState, OpenModal,
};
pub use services::{ModalController, RelatednessConfig, RelatednessEngine};
pub use storage::AuthorStore;

/// Error type for authorgraph operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Load` | A source dataset cannot be parsed as a mapping of identifier → record |
/// | `AuthorNotFound` | `ModalController::open` is called with a key the store never loaded |
/// | `Fetch` | The remote summary request fails (transport error or non-2xx status) |
/// | `InvalidInput` | Malformed endpoint URL or other caller-supplied configuration |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A source dataset failed to load or parse.
    ///
    /// Raised when:
    /// - The authors or categories JSON is not valid JSON
    /// - The JSON is valid but not a mapping of identifier → record
    ///
    /// Load failures degrade the dependent feature rather than aborting:
    /// see [`AuthorStore::from_json_lenient`].
    #[error("failed to load {dataset} dataset: {cause}")]
    Load {
        /// Which dataset failed ("authors" or "categories").
        dataset: &'static str,
        /// The underlying parse error.
        cause: String,
    },

    /// The requested author key is absent from the store.
    ///
    /// Reported to the caller; the controller state is unchanged.
    #[error("author not found: {0}")]
    AuthorNotFound(String),

    /// The remote biography fetch failed.
    ///
    /// Raised when:
    /// - The HTTP request fails at the transport level (timeout, DNS, TLS)
    /// - The summary endpoint returns a non-success status
    /// - The response body cannot be parsed
    ///
    /// Surfaced as [`BioState::Error`] with a fallback external link; never
    /// fatal to the rest of the modal's already-resolved data.
    #[error("biography fetch failed for '{page_id}': {cause}")]
    Fetch {
        /// The remote summary identifier that was requested.
        page_id: String,
        /// The underlying cause.
        cause: String,
    },

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A configured endpoint is not a valid base URL
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for authorgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Load {
            dataset: "authors",
            cause: "expected object".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load authors dataset: expected object"
        );

        let err = Error::AuthorNotFound("noether".to_string());
        assert_eq!(err.to_string(), "author not found: noether");

        let err = Error::Fetch {
            page_id: "Leonhard_Euler".to_string(),
            cause: "status 503".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "biography fetch failed for 'Leonhard_Euler': status 503"
        );
    }
}
