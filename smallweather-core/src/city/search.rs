use serde::{Deserialize, Serialize};

use super::{CityRecord, Dataset};

/// Number of suggestions returned when the caller does not pick a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Projection of a [`CityRecord`] returned by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: Option<i64>,
    pub name: String,
    /// `"<name>, <country>"`.
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub country: String,
}

impl From<&CityRecord> for SearchResult {
    fn from(city: &CityRecord) -> Self {
        Self {
            id: city.id,
            name: city.name.clone(),
            full_name: city.display_name(),
            country: city.country.clone(),
        }
    }
}

/// Substring search over an owned [`Dataset`].
///
/// Matching is case-insensitive containment against `"<name>, <country>"`.
/// There is no scoring: results come back in dataset order and the first
/// `limit` matches win.
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    dataset: Dataset,
    /// Lowercased comparison strings, parallel to `dataset`.
    keys: Vec<String>,
}

impl CityIndex {
    pub fn new(dataset: Dataset) -> Self {
        let keys = dataset
            .iter()
            .map(|city| city.display_name().to_lowercase())
            .collect();

        Self { dataset, keys }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Return up to `limit` cities whose `"<name>, <country>"` contains `query`.
    ///
    /// An empty or absent query returns nothing without scanning.
    pub fn search<'q>(&self, query: impl Into<Option<&'q str>>, limit: usize) -> Vec<SearchResult> {
        let Some(query) = query.into().filter(|q| !q.is_empty()) else {
            return Vec::new();
        };

        let needle = query.to_lowercase();

        self.dataset
            .iter()
            .zip(&self.keys)
            .filter(|(_, key)| key.contains(needle.as_str()))
            .take(limit)
            .map(|(city, _)| SearchResult::from(city))
            .collect()
    }

    /// [`search`](Self::search) with [`DEFAULT_SEARCH_LIMIT`].
    pub fn suggest<'q>(&self, query: impl Into<Option<&'q str>>) -> Vec<SearchResult> {
        self.search(query, DEFAULT_SEARCH_LIMIT)
    }
}

impl From<Dataset> for CityIndex {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}
