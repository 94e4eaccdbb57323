use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{error::ForecastError, model::ForecastRequest};

use super::ForecastProvider;

/// Free-tier 5-day / 3-hour forecast endpoint.
pub const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Stored in [`ForecastError::Status`] when the error response body could not be read.
pub const UNREADABLE_BODY: &str = "<unreadable body>";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: FORECAST_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the provider at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Full 5-day forecast in 3-hour steps.
    pub async fn fetch_forecast(&self, city: &str) -> Result<Value, ForecastError> {
        self.forecast(&ForecastRequest::new(city)).await
    }

    /// Forecast capped at `cnt` 3-hour entries.
    pub async fn fetch_forecast_limited(&self, city: &str, cnt: u32) -> Result<Value, ForecastError> {
        self.forecast(&ForecastRequest::new(city).with_count(cnt)).await
    }

    async fn send(&self, request: &ForecastRequest) -> Result<Value, ForecastError> {
        let mut query = vec![
            ("q", request.city.clone()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        if let Some(cnt) = request.count {
            query.push(("cnt", cnt.to_string()));
        }

        debug!(city = %request.city, count = ?request.count, url = %self.base_url, "requesting forecast");

        let res = self.http.get(&self.base_url).query(&query).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = match res.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(%status, %err, "Failed to read forecast error body");
                    UNREADABLE_BODY.to_string()
                }
            };
            return Err(ForecastError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(res.json::<Value>().await?)
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn forecast(&self, request: &ForecastRequest) -> Result<Value, ForecastError> {
        self.send(request)
            .await
            .inspect_err(|err| error!(city = %request.city, %err, "Error fetching forecast"))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWeather {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCity {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwForecastEntry {
    pub dt: i64,
    pub main: OwMain,
    pub weather: Vec<OwWeather>,
    pub wind: OwWind,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwForecastResponse {
    pub city: OwCity,
    pub list: Vec<OwForecastEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
