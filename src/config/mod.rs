//! Configuration management.

use std::path::PathBuf;

/// Main configuration for authorgraph.
#[derive(Debug, Clone)]
pub struct AuthorgraphConfig {
    /// Path to the authors dataset (JSON mapping of identifier → record).
    pub authors_path: PathBuf,
    /// Path to the category dataset (flat or `key_bridge_authors`-wrapped).
    pub categories_path: PathBuf,
    /// Base URL of the remote summary endpoint.
    pub wikipedia_endpoint: String,
}

impl AuthorgraphConfig {
    /// Default authors dataset path, relative to the site root.
    pub const DEFAULT_AUTHORS_PATH: &'static str = "data/authors.json";

    /// Default category dataset path, relative to the site root.
    pub const DEFAULT_CATEGORIES_PATH: &'static str = "data/processed/problem_categories.json";

    /// Creates a configuration from defaults and environment overrides.
    ///
    /// `AUTHORGRAPH_WIKIPEDIA_ENDPOINT` overrides the summary endpoint.
    #[must_use]
    pub fn from_env() -> Self {
        let wikipedia_endpoint = std::env::var("AUTHORGRAPH_WIKIPEDIA_ENDPOINT")
            .unwrap_or_else(|_| crate::fetch::WikipediaClient::DEFAULT_ENDPOINT.to_string());
        Self {
            authors_path: PathBuf::from(Self::DEFAULT_AUTHORS_PATH),
            categories_path: PathBuf::from(Self::DEFAULT_CATEGORIES_PATH),
            wikipedia_endpoint,
        }
    }

    /// Sets the authors dataset path.
    #[must_use]
    pub fn with_authors_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.authors_path = path.into();
        self
    }

    /// Sets the category dataset path.
    #[must_use]
    pub fn with_categories_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.categories_path = path.into();
        self
    }

    /// Sets the summary endpoint.
    #[must_use]
    pub fn with_wikipedia_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.wikipedia_endpoint = endpoint.into();
        self
    }
}

impl Default for AuthorgraphConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = AuthorgraphConfig::from_env()
            .with_authors_path("custom/authors.json")
            .with_wikipedia_endpoint("http://localhost:8080/summary");
        assert_eq!(config.authors_path, PathBuf::from("custom/authors.json"));
        assert_eq!(config.wikipedia_endpoint, "http://localhost:8080/summary");
        assert_eq!(
            config.categories_path,
            PathBuf::from(AuthorgraphConfig::DEFAULT_CATEGORIES_PATH)
        );
    }
}
