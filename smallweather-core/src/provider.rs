use crate::{Config, ForecastError, ForecastRequest, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the forecast for `request.city`, returning the provider payload as-is.
    async fn forecast(&self, request: &ForecastRequest) -> Result<Value, ForecastError>;
}

/// Construct the forecast provider from config.
///
/// The API key comes from `OPENWEATHER_API_KEY` if set, otherwise from the
/// config file.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    build_provider(config, config.api_key())
}

fn build_provider(
    config: &Config,
    api_key: Option<String>,
) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = api_key.ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `smallweather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let mut provider = OpenWeatherProvider::new(api_key);
    if let Some(url) = &config.forecast_url {
        provider = provider.with_base_url(url.clone());
    }

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_provider_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = build_provider(&cfg, None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `smallweather configure`"));
    }

    #[test]
    fn build_provider_works_with_key() {
        let cfg = Config::default();
        assert!(build_provider(&cfg, Some("KEY".to_string())).is_ok());
    }

    #[test]
    fn build_provider_applies_url_override() {
        let cfg = Config {
            forecast_url: Some("http://localhost:9/forecast".to_string()),
            ..Config::default()
        };

        let provider = build_provider(&cfg, Some("KEY".to_string())).unwrap();
        assert!(format!("{provider:?}").contains("http://localhost:9/forecast"));
    }
}
