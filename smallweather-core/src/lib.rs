//! Core library for the `smallweather` CLI.
//!
//! This crate defines:
//! - The bundled city dataset and the autocomplete search over it
//! - A thin client for the OpenWeather 5-day forecast API
//! - Configuration & credentials handling
//!
//! The bundled dataset only covers a few dozen major cities. Point
//! [`Dataset::from_path`] (or `dataset_path` in [`Config`]) at a complete
//! `id,name,state,country,country_full,lat,lng` file for full coverage.
//!
//! It is used by `smallweather-cli`, but can also be reused by other binaries or services.

pub mod city;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;

pub use city::{CityIndex, CityRecord, DEFAULT_SEARCH_LIMIT, Dataset, SearchResult};
pub use config::Config;
pub use error::ForecastError;
pub use format::format_city_name;
pub use model::{Forecast, ForecastEntry, ForecastRequest};
pub use provider::{ForecastProvider, openweather::OpenWeatherProvider, provider_from_config};
