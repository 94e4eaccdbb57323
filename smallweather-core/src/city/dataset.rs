use anyhow::{Context, Result};
use std::{fs, path::Path, slice};
use tracing::debug;

use super::CityRecord;

/// City list compiled into the binary.
const EMBEDDED_CITIES: &str = include_str!("../../data/cities.csv");

/// Ordered, read-only collection of cities in file order.
///
/// Expected layout is one header line followed by rows of
/// `id,name,state,country,country_full,lat,lng`. Fields are split on every
/// comma; quoted fields containing commas are not supported.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CityRecord>,
}

impl Dataset {
    /// Parse raw CSV text. Never fails: rows without a name or country code
    /// are dropped, and malformed numbers become `None`.
    pub fn parse(raw: &str) -> Self {
        let mut records = Vec::new();
        let mut dropped = 0usize;

        for line in raw.lines().skip(1).filter(|line| !line.is_empty()) {
            match parse_line(line) {
                Some(record) => records.push(record),
                None => dropped += 1,
            }
        }

        debug!(kept = records.len(), dropped, "parsed city dataset");

        Self { records }
    }

    /// Dataset bundled with the crate.
    ///
    /// This is a small sample of major cities meant for demos and tests. For
    /// real autocomplete load a full city list with [`Dataset::from_path`]
    /// (`--dataset` on the CLI, `dataset_path` in the config file).
    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_CITIES)
    }

    /// Read and parse a dataset file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read city dataset: {}", path.display()))?;

        Ok(Self::parse(&raw))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, CityRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a CityRecord;
    type IntoIter = slice::Iter<'a, CityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_line(line: &str) -> Option<CityRecord> {
    let mut fields = line.split(',');
    let mut next = || fields.next().unwrap_or("");

    let id = next();
    let name = next();
    let state = next();
    let country = next();
    let country_full = next();
    let lat = next();
    let lng = next();

    let record = CityRecord {
        id: id.trim().parse().ok(),
        name: name.to_string(),
        state: strip_quotes(state),
        country: strip_quotes(country),
        country_full: strip_quotes(country_full),
        lat: parse_coord(lat),
        lng: parse_coord(lng),
    };

    (!record.name.is_empty() && !record.country.is_empty()).then_some(record)
}

fn strip_quotes(field: &str) -> String {
    field.replace('"', "")
}

fn parse_coord(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
