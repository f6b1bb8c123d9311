//! Message catalogs: ordered maps from message id to template.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::LoadError;

/// Message templates keyed by id, in file order.
///
/// Catalog files are flat JSON objects:
///
/// ```
/// use nanointl::Catalog;
///
/// let catalog = Catalog::from_json_str(r#"{ "greeting": "Hello, {name}!" }"#).unwrap();
/// assert_eq!(catalog.get("greeting"), Some("Hello, {name}!"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    messages: IndexMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog = serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), messages = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
    }

    /// Add or replace a message.
    pub fn insert(&mut self, id: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(id.into(), template.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.messages.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.messages.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(id, template)| (id.into(), template.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Catalog {
    fn from(messages: [(K, V); N]) -> Self {
        messages.into_iter().collect()
    }
}

impl From<IndexMap<String, String>> for Catalog {
    fn from(messages: IndexMap<String, String>) -> Self {
        Self { messages }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
