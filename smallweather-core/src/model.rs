use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::openweather::OwForecastResponse;

/// Parameters of a single forecast lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub city: String,
    /// Cap on the number of 3-hour entries; `None` lets the provider decide.
    pub count: Option<u32>,
}

impl ForecastRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into(), count: None }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

/// One 3-hour slot of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// Typed view of a raw forecast payload, used for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location_name: String,
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    /// Extract the fields we show from a provider payload.
    pub fn from_payload(payload: &Value) -> Result<Self, serde_json::Error> {
        let parsed = OwForecastResponse::deserialize(payload)?;

        let entries = parsed
            .list
            .into_iter()
            .map(|entry| ForecastEntry {
                time: DateTime::<Utc>::from_timestamp(entry.dt, 0).unwrap_or_else(Utc::now),
                temperature_c: entry.main.temp,
                feels_like_c: entry.main.feels_like,
                condition: entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.description)
                    .unwrap_or_else(|| "Unknown".to_string()),
                humidity_pct: entry.main.humidity,
                wind_speed_mps: entry.wind.speed,
            })
            .collect();

        Ok(Self {
            location_name: format!("{}, {}", parsed.city.name, parsed.city.country),
            entries,
        })
    }

    /// Entry closest to `when`.
    pub fn nearest(&self, when: DateTime<Utc>) -> Option<&ForecastEntry> {
        let target = when.timestamp();
        self.entries.iter().min_by_key(|e| (e.time.timestamp() - target).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "cod": "200",
            "cnt": 2,
            "list": [
                {
                    "dt": 1_700_000_000,
                    "main": { "temp": 11.2, "feels_like": 9.8, "humidity": 81 },
                    "weather": [{ "id": 500, "main": "Rain", "description": "light rain" }],
                    "wind": { "speed": 4.1, "deg": 220 }
                },
                {
                    "dt": 1_700_010_800,
                    "main": { "temp": 10.4, "feels_like": 8.9, "humidity": 85 },
                    "weather": [],
                    "wind": { "speed": 3.6 }
                }
            ],
            "city": { "id": 2643743, "name": "London", "country": "GB" }
        })
    }

    #[test]
    fn request_builder_sets_count() {
        let req = ForecastRequest::new("Oslo");
        assert_eq!(req.count, None);
        assert_eq!(req.with_count(4).count, Some(4));
    }

    #[test]
    fn parses_openweather_payload() {
        let forecast = Forecast::from_payload(&payload()).unwrap();

        assert_eq!(forecast.location_name, "London, GB");
        assert_eq!(forecast.entries.len(), 2);

        let first = &forecast.entries[0];
        assert_eq!(first.time.timestamp(), 1_700_000_000);
        assert_eq!(first.temperature_c, 11.2);
        assert_eq!(first.feels_like_c, 9.8);
        assert_eq!(first.humidity_pct, 81);
        assert_eq!(first.condition, "light rain");
        assert_eq!(first.wind_speed_mps, 4.1);
    }

    #[test]
    fn missing_weather_description_is_unknown() {
        let forecast = Forecast::from_payload(&payload()).unwrap();
        assert_eq!(forecast.entries[1].condition, "Unknown");
    }

    #[test]
    fn rejects_payload_without_city() {
        let err = Forecast::from_payload(&json!({ "list": [] }));
        assert!(err.is_err());
    }

    #[test]
    fn nearest_picks_closest_entry() {
        let forecast = Forecast::from_payload(&payload()).unwrap();
        let when = DateTime::<Utc>::from_timestamp(1_700_009_000, 0).unwrap();

        let entry = forecast.nearest(when).unwrap();
        assert_eq!(entry.time.timestamp(), 1_700_010_800);
    }
}
