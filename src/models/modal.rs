//! Modal state machine types.
//!
//! The controller publishes these as cloneable snapshots; a presentation
//! layer renders them without ever reaching back into the core.

use super::{AuthorRecord, Connection};
use std::sync::Arc;

/// Top-level state of the author detail modal.
#[derive(Debug, Clone, Default)]
pub enum ModalState {
    /// No author is being displayed.
    #[default]
    Closed,
    /// An open request was accepted and is being resolved.
    Opening(
        /// The author key being resolved.
        String,
    ),
    /// The modal is open with resolved data.
    Open(OpenModal),
}

impl ModalState {
    /// Returns the resolved modal data if the state is `Open`.
    #[must_use]
    pub const fn as_open(&self) -> Option<&OpenModal> {
        match self {
            Self::Open(modal) => Some(modal),
            _ => None,
        }
    }

    /// Returns true if no author is being displayed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Resolved data for an open modal.
///
/// Everything except the biography is available synchronously at open time.
/// An author with no category record yields empty works, domains, and
/// related lists (degraded mode, not an error).
#[derive(Debug, Clone)]
pub struct OpenModal {
    /// The author key this modal was opened for.
    pub key: String,
    /// The loaded author record (shared by identity with the store).
    pub author: Arc<AuthorRecord>,
    /// Notable work titles, in dataset order.
    pub works: Vec<String>,
    /// Domain badges: the primary domain first, then bridge domains.
    pub domains: Vec<DomainBadge>,
    /// Full ranked list of related authors, highest score first.
    ///
    /// Top-N truncation for display is the presentation layer's concern.
    pub related: Vec<Connection>,
    /// Current biography sub-state.
    pub biography: BioState,
}

/// Biography display sub-state within an open modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BioState {
    /// A previously fetched biography was found in the session cache.
    Cached(
        /// The cached truncated text.
        String,
    ),
    /// A remote fetch is outstanding.
    Loading,
    /// The fetch succeeded; the text has been truncated and cached.
    Loaded(
        /// The truncated biography text (may be empty).
        String,
    ),
    /// The fetch failed; the modal offers a manual external link instead.
    Error {
        /// The author's external reference URL.
        wikipedia_url: String,
    },
}

impl BioState {
    /// Returns the displayable biography text, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Cached(text) | Self::Loaded(text) => Some(text),
            _ => None,
        }
    }
}

/// A topical domain badge for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainBadge {
    /// The domain label, already in readable form.
    pub name: String,
    /// Whether this is the author's primary domain or a bridge.
    pub kind: DomainKind,
}

/// Badge kind for a [`DomainBadge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    /// The author's principal topical category.
    Primary,
    /// A secondary category connecting the author to other fields.
    Bridge,
}

impl DomainKind {
    /// Returns the kind as a string slice (the CSS class name downstream).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Bridge => "bridge",
        }
    }
}
