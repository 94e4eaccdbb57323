//! City dataset and autocomplete search.
//!
//! A [`Dataset`] is parsed once from the 7-column city CSV and handed to a
//! [`CityIndex`], which owns it and answers substring queries against the
//! `"<name>, <country>"` form of each city.

use serde::{Deserialize, Serialize};

pub mod dataset;
pub mod search;

pub use dataset::Dataset;
pub use search::{CityIndex, DEFAULT_SEARCH_LIMIT, SearchResult};

/// A single parsed entry from the city dataset.
///
/// Numeric columns that fail to parse are kept as `None` instead of failing
/// the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub id: Option<i64>,
    pub name: String,
    /// State or region code, may be empty.
    pub state: String,
    /// Country code, e.g. "GB".
    pub country: String,
    pub country_full: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl CityRecord {
    /// `"<name>, <country>"`, the form shown to users and matched by search.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}
