//! Author record types and identifiers.

use serde::Deserialize;
use std::fmt;

/// Unique identifier for an author, as used in the source datasets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorKey(String);

impl AuthorKey {
    /// Creates a new author key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AuthorKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AuthorKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A loaded author record.
///
/// Immutable after load; the store hands these out behind `Arc` so every
/// consumer references the same loaded record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorRecord {
    /// Human-readable display name.
    pub full_name: String,
    /// External reference URL (the manual fallback link).
    pub wikipedia_url: String,
    /// Identifier for the remote summary lookup.
    pub wikipedia_page_id: String,
}

/// Topical category data for an author.
///
/// Keyed by the same identifier as [`AuthorRecord`]; an author with no
/// category record simply yields no relatedness, works, or domains data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRecord {
    /// The single topical category this author is principally associated with.
    #[serde(rename = "primary_problem")]
    pub primary: String,
    /// Secondary topical categories connecting the author to other fields.
    #[serde(default)]
    pub bridges: Vec<String>,
    /// Ordered list of notable work titles.
    #[serde(default)]
    pub works: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_key_preserves_string() {
        let key = AuthorKey::new("euler");
        assert_eq!(key.as_str(), "euler");
        assert_eq!(key.to_string(), "euler");
        assert_eq!(AuthorKey::from("euler"), AuthorKey::from("euler".to_string()));
    }

    #[test]
    fn test_category_record_defaults_optional_fields() {
        let record: CategoryRecord =
            serde_json::from_str(r#"{"primary_problem": "number theory"}"#)
                .expect("valid record");
        assert_eq!(record.primary, "number theory");
        assert!(record.bridges.is_empty());
        assert!(record.works.is_empty());
    }

    #[test]
    fn test_author_record_field_names() {
        let record: AuthorRecord = serde_json::from_str(
            r#"{
                "full_name": "Leonhard Euler",
                "wikipedia_url": "https://en.wikipedia.org/wiki/Leonhard_Euler",
                "wikipedia_page_id": "Leonhard_Euler"
            }"#,
        )
        .expect("valid record");
        assert_eq!(record.full_name, "Leonhard Euler");
        assert_eq!(record.wikipedia_page_id, "Leonhard_Euler");
    }
}
