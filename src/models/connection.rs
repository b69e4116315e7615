//! Scored relationships between authors.

use super::AuthorKey;

/// A scored, explained relationship between the subject author and a
/// candidate author.
///
/// Ephemeral: recomputed on every ranking query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// The candidate author this connection points at.
    pub key: AuthorKey,
    /// Accumulated relatedness score.
    pub score: u32,
    /// Human-readable reasons, in the order the scoring rules fired.
    pub reasons: Vec<String>,
}

impl Connection {
    /// Joins the reasons into a single display string.
    #[must_use]
    pub fn reason_summary(&self) -> String {
        self.reasons.join(" • ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_summary_joins_with_bullet() {
        let conn = Connection {
            key: AuthorKey::new("gauss"),
            score: 5,
            reasons: vec![
                "Both work in number theory".to_string(),
                "Bridge to analysis".to_string(),
            ],
        };
        assert_eq!(
            conn.reason_summary(),
            "Both work in number theory • Bridge to analysis"
        );
    }
}
