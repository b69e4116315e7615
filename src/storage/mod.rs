//! In-memory read-only store over the loaded author datasets.
//!
//! Two source datasets back the store: author records (display name plus
//! external references) and category records (primary domain, bridge
//! domains, works). The key sets may be disjoint; an author without a
//! category record simply yields no relatedness, works, or domains data.
//!
//! Iteration order matters: ranking tie-breaks follow the insertion order of
//! the category dataset, so the store keeps the key order it saw at load
//! time (`serde_json` is built with `preserve_order`).

use crate::models::{AuthorRecord, CategoryRecord};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// Wrapper section name used by the original category data file.
const CATEGORY_SECTION: &str = "key_bridge_authors";

/// Read-only view over the loaded author and category datasets.
///
/// Built once at startup; never mutated afterward. Records are handed out
/// behind `Arc` so every consumer references the loaded record by identity.
#[derive(Debug, Default)]
pub struct AuthorStore {
    authors: HashMap<String, Arc<AuthorRecord>>,
    author_order: Vec<String>,
    categories: HashMap<String, Arc<CategoryRecord>>,
    category_order: Vec<String>,
}

impl AuthorStore {
    /// Builds a store from both datasets, failing on either parse error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if either dataset is not a JSON mapping of
    /// identifier → record.
    pub fn from_json(authors_json: &str, categories_json: &str) -> Result<Self> {
        let mut store = Self::default();
        store.load_authors(authors_json)?;
        store.load_categories(categories_json)?;
        Ok(store)
    }

    /// Builds a store tolerating per-dataset failures.
    ///
    /// A dataset that fails to parse yields an empty mapping and a warning;
    /// the other dataset still loads. Category-dependent features then
    /// degrade to empty results instead of failing the whole modal.
    #[must_use]
    pub fn from_json_lenient(authors_json: &str, categories_json: &str) -> Self {
        let mut store = Self::default();
        if let Err(e) = store.load_authors(authors_json) {
            tracing::warn!(error = %e, "authors dataset failed to load, continuing without it");
        }
        if let Err(e) = store.load_categories(categories_json) {
            tracing::warn!(
                error = %e,
                "categories dataset failed to load, relatedness and works will be empty"
            );
        }
        store
    }

    fn load_authors(&mut self, json: &str) -> Result<()> {
        let records: Vec<(String, AuthorRecord)> = parse_dataset("authors", json)?;
        for (key, record) in records {
            self.author_order.push(key.clone());
            self.authors.insert(key, Arc::new(record));
        }
        tracing::debug!(count = self.authors.len(), "loaded author records");
        Ok(())
    }

    fn load_categories(&mut self, json: &str) -> Result<()> {
        // The original data file nests the mapping under a section header;
        // accept both that shape and a flat mapping.
        let value: serde_json::Value = serde_json::from_str(json).map_err(|e| Error::Load {
            dataset: "categories",
            cause: e.to_string(),
        })?;
        let value = match value {
            serde_json::Value::Object(ref map) if map.contains_key(CATEGORY_SECTION) => map
                .get(CATEGORY_SECTION)
                .cloned()
                .unwrap_or(serde_json::Value::Null),
            other => other,
        };
        let records: Vec<(String, CategoryRecord)> = parse_dataset_value("categories", value)?;
        for (key, record) in records {
            self.category_order.push(key.clone());
            self.categories.insert(key, Arc::new(record));
        }
        tracing::debug!(count = self.categories.len(), "loaded category records");
        Ok(())
    }

    /// Looks up an author record by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<AuthorRecord>> {
        self.authors.get(key).cloned()
    }

    /// Looks up a category record by key.
    #[must_use]
    pub fn category(&self, key: &str) -> Option<Arc<CategoryRecord>> {
        self.categories.get(key).cloned()
    }

    /// Returns all loaded author keys in dataset insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.author_order.iter().map(String::as_str)
    }

    /// Returns all keys with category records, in dataset insertion order.
    ///
    /// This is the iteration order the relatedness ranking uses for
    /// tie-breaks, so it must be reproducible given the same input data.
    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.category_order.iter().map(String::as_str)
    }

    /// Returns the number of loaded author records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    /// Returns true if no author records were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

/// Parses a JSON string as a mapping of identifier → record, keeping the
/// mapping's insertion order.
fn parse_dataset<T: DeserializeOwned>(
    dataset: &'static str,
    json: &str,
) -> Result<Vec<(String, T)>> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| Error::Load {
        dataset,
        cause: e.to_string(),
    })?;
    parse_dataset_value(dataset, value)
}

fn parse_dataset_value<T: DeserializeOwned>(
    dataset: &'static str,
    value: serde_json::Value,
) -> Result<Vec<(String, T)>> {
    let serde_json::Value::Object(map) = value else {
        return Err(Error::Load {
            dataset,
            cause: "expected a JSON object mapping identifier to record".to_string(),
        });
    };
    let mut records = Vec::with_capacity(map.len());
    for (key, entry) in map {
        let record: T = serde_json::from_value(entry).map_err(|e| Error::Load {
            dataset,
            cause: format!("record '{key}': {e}"),
        })?;
        records.push((key, record));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHORS: &str = r#"{
        "euler": {
            "full_name": "Leonhard Euler",
            "wikipedia_url": "https://en.wikipedia.org/wiki/Leonhard_Euler",
            "wikipedia_page_id": "Leonhard_Euler"
        },
        "gauss": {
            "full_name": "Carl Friedrich Gauss",
            "wikipedia_url": "https://en.wikipedia.org/wiki/Carl_Friedrich_Gauss",
            "wikipedia_page_id": "Carl_Friedrich_Gauss"
        }
    }"#;

    const CATEGORIES_FLAT: &str = r#"{
        "euler": {"primary_problem": "number theory", "bridges": ["analysis"], "works": ["Introductio"]},
        "gauss": {"primary_problem": "number theory", "bridges": ["geometry"]}
    }"#;

    const CATEGORIES_WRAPPED: &str = r#"{
        "key_bridge_authors": {
            "euler": {"primary_problem": "number theory", "bridges": ["analysis"], "works": ["Introductio"]},
            "gauss": {"primary_problem": "number theory", "bridges": ["geometry"]}
        }
    }"#;

    #[test]
    fn test_from_json_loads_both_datasets() {
        let store = AuthorStore::from_json(AUTHORS, CATEGORIES_FLAT).unwrap();
        assert_eq!(store.len(), 2);
        let euler = store.get("euler").unwrap();
        assert_eq!(euler.full_name, "Leonhard Euler");
        let category = store.category("euler").unwrap();
        assert_eq!(category.primary, "number theory");
        assert_eq!(category.works, vec!["Introductio".to_string()]);
    }

    #[test]
    fn test_wrapped_and_flat_category_shapes_parse_identically() {
        let flat = AuthorStore::from_json(AUTHORS, CATEGORIES_FLAT).unwrap();
        let wrapped = AuthorStore::from_json(AUTHORS, CATEGORIES_WRAPPED).unwrap();
        assert_eq!(flat.category("gauss"), wrapped.category("gauss"));
        assert_eq!(
            flat.category_keys().collect::<Vec<_>>(),
            wrapped.category_keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_from_json_rejects_non_object_dataset() {
        let err = AuthorStore::from_json("[1, 2, 3]", CATEGORIES_FLAT).unwrap_err();
        assert!(matches!(err, crate::Error::Load { dataset: "authors", .. }));
    }

    #[test]
    fn test_from_json_rejects_malformed_record() {
        let err =
            AuthorStore::from_json(r#"{"euler": {"full_name": 42}}"#, CATEGORIES_FLAT).unwrap_err();
        assert!(matches!(err, crate::Error::Load { dataset: "authors", .. }));
    }

    #[test]
    fn test_lenient_load_degrades_one_dataset() {
        let store = AuthorStore::from_json_lenient(AUTHORS, "not json");
        assert_eq!(store.len(), 2);
        assert!(store.category("euler").is_none());
        assert_eq!(store.category_keys().count(), 0);

        let store = AuthorStore::from_json_lenient("not json", CATEGORIES_FLAT);
        assert!(store.is_empty());
        assert!(store.category("euler").is_some());
    }

    #[test]
    fn test_key_order_follows_dataset_insertion_order() {
        let store = AuthorStore::from_json(AUTHORS, CATEGORIES_FLAT).unwrap();
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["euler", "gauss"]);
        assert_eq!(
            store.category_keys().collect::<Vec<_>>(),
            vec!["euler", "gauss"]
        );
    }

    #[test]
    fn test_records_shared_by_identity() {
        let store = AuthorStore::from_json(AUTHORS, CATEGORIES_FLAT).unwrap();
        let a = store.get("euler").unwrap();
        let b = store.get("euler").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
