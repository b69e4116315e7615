//! Author relatedness scoring.
//!
//! Ranks every other author against a subject by shared topical categories.
//!
//! # Algorithm
//!
//! For each candidate `o` with a category record (subject excluded):
//!
//! ```text
//! +3  o.primary == subject.primary        "Both work in {primary}"
//! +2  per label shared between bridges    "Bridge to {labels, comma-joined}"
//!     (each shared label counted once)
//! +2  subject.primary ∈ o.bridges         "Bridges to {subject.primary}"
//! +2  o.primary ∈ subject.bridges         "Connected via {o.primary}"
//!     (reason suppressed when an earlier reason already mentions o.primary)
//! ```
//!
//! Candidates scoring 0 are excluded. The result is stably sorted by score
//! descending; ties keep the category dataset's insertion order, so the
//! ranking is reproducible given the same input data.

use crate::models::{AuthorKey, Connection};
use crate::storage::AuthorStore;
use std::sync::Arc;

/// Scoring weights for the relatedness rules.
#[derive(Debug, Clone)]
pub struct RelatednessConfig {
    /// Points for an identical primary domain (default: 3).
    pub primary_match: u32,
    /// Points per shared bridge label (default: 2).
    pub shared_bridge: u32,
    /// Points when one author's primary appears in the other's bridges,
    /// applied per direction (default: 2).
    pub cross_primary: u32,
}

impl Default for RelatednessConfig {
    fn default() -> Self {
        Self {
            primary_match: 3,
            shared_bridge: 2,
            cross_primary: 2,
        }
    }
}

/// Ranks authors against a subject by shared topical categories.
///
/// Pure over the store: never mutates it, recomputes on every query.
#[derive(Debug, Clone)]
pub struct RelatednessEngine {
    store: Arc<AuthorStore>,
    config: RelatednessConfig,
}

impl RelatednessEngine {
    /// Creates an engine over the given store with default weights.
    #[must_use]
    pub fn new(store: Arc<AuthorStore>) -> Self {
        Self {
            store,
            config: RelatednessConfig::default(),
        }
    }

    /// Sets the scoring weights.
    #[must_use]
    pub fn with_config(mut self, config: RelatednessConfig) -> Self {
        self.config = config;
        self
    }

    /// Ranks all other authors against the subject, highest score first.
    ///
    /// Returns the full ranked sequence; top-N truncation for display is
    /// the caller's concern. A subject without a category record yields an
    /// empty sequence (not an error).
    #[must_use]
    pub fn rank(&self, subject_key: &str) -> Vec<Connection> {
        let Some(subject) = self.store.category(subject_key) else {
            tracing::debug!(subject_key, "no category record, relatedness is empty");
            return Vec::new();
        };

        let mut connections = Vec::new();

        for candidate_key in self.store.category_keys() {
            if candidate_key == subject_key {
                continue;
            }
            let Some(candidate) = self.store.category(candidate_key) else {
                continue;
            };

            let mut score = 0u32;
            let mut reasons = Vec::new();

            if candidate.primary == subject.primary {
                score += self.config.primary_match;
                reasons.push(format!("Both work in {}", candidate.primary));
            }

            // Each shared bridge label counts once, even when the subject
            // lists it more than once.
            let mut shared: Vec<&str> = Vec::new();
            for label in &subject.bridges {
                if candidate.bridges.contains(label) && !shared.contains(&label.as_str()) {
                    shared.push(label);
                    score += self.config.shared_bridge;
                }
            }
            if !shared.is_empty() {
                reasons.push(format!("Bridge to {}", shared.join(", ")));
            }

            if candidate.bridges.contains(&subject.primary) {
                score += self.config.cross_primary;
                reasons.push(format!("Bridges to {}", subject.primary));
            }

            if subject.bridges.contains(&candidate.primary) {
                score += self.config.cross_primary;
                // Substring check mirrors the site's historical behavior;
                // overlapping labels can over-suppress here.
                if !reasons.iter().any(|r| r.contains(candidate.primary.as_str())) {
                    reasons.push(format!("Connected via {}", candidate.primary));
                }
            }

            if score > 0 {
                connections.push(Connection {
                    key: AuthorKey::new(candidate_key),
                    score,
                    reasons,
                });
            }
        }

        // Stable: ties keep dataset insertion order.
        connections.sort_by(|a, b| b.score.cmp(&a.score));
        connections
    }
}
