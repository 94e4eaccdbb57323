use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use smallweather_core::{
    CityIndex, Config, Forecast, ForecastEntry, ForecastRequest, SearchResult, format_city_name,
    provider_from_config,
};

use crate::suggest;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "smallweather", version, about = "City search and weather forecasts")]
pub struct Cli {
    /// City CSV to use instead of the bundled dataset.
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Search cities by name or country code.
    Search {
        /// Text to look for, e.g. "lond" or "paris, fr".
        query: String,

        /// Maximum number of results.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the 5-day / 3-hour forecast for a city.
    Forecast {
        /// City name; prompts with suggestions if omitted.
        city: Option<String>,

        /// Number of 3-hour entries to request.
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// Print the provider payload as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Search { query, limit, json } => {
                if let Some(path) = self.dataset {
                    config.dataset_path = Some(path);
                }
                let limit = limit.unwrap_or_else(|| config.search_limit());
                search(&config, &query, limit, json)
            }
            Command::Forecast { city, count, json } => {
                if let Some(path) = self.dataset {
                    config.dataset_path = Some(path);
                }
                forecast(&config, city, count, json).await
            }
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(key.to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

fn load_index(config: &Config) -> anyhow::Result<CityIndex> {
    let dataset = config.dataset()?;
    tracing::debug!(cities = dataset.len(), "city dataset ready");
    Ok(CityIndex::new(dataset))
}

fn search(config: &Config, query: &str, limit: usize, json: bool) -> anyhow::Result<()> {
    let index = load_index(config)?;
    let results = index.search(query, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No cities match '{query}'.");
    } else {
        for line in results.iter().map(format_result) {
            println!("{line}");
        }
    }

    Ok(())
}

fn format_result(result: &SearchResult) -> String {
    match result.id {
        Some(id) => format!("{:<32} #{id}", result.full_name),
        None => result.full_name.clone(),
    }
}

async fn forecast(
    config: &Config,
    city: Option<String>,
    count: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let city = match city {
        Some(city) => city,
        None => {
            let index = Arc::new(load_index(config)?);
            suggest::prompt_city(index, config.search_limit())?
        }
    };
    let city = normalize_city(&city)?;

    let provider = provider_from_config(config)?;

    let mut request = ForecastRequest::new(city);
    if let Some(count) = count {
        request = request.with_count(count);
    }

    let payload = provider
        .forecast(&request)
        .await
        .with_context(|| format!("Could not fetch forecast for {}", format_city_name(&request.city)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let forecast = Forecast::from_payload(&payload).context("Unexpected forecast payload")?;
    print_forecast(&forecast);

    Ok(())
}

fn normalize_city(city: &str) -> anyhow::Result<String> {
    let city = city.trim();
    if city.is_empty() {
        bail!("No city given");
    }
    Ok(city.to_string())
}

fn print_forecast(forecast: &Forecast) {
    println!("Forecast for {}", forecast.location_name);

    if let Some(now) = forecast.nearest(Utc::now()) {
        println!("Now: {:.1}°C, {}", now.temperature_c, now.condition);
    }
    println!();

    for entry in &forecast.entries {
        println!("{}", format_entry(entry));
    }
}

fn format_entry(entry: &ForecastEntry) -> String {
    format!(
        "{}  {:>6.1}°C (feels {:.1}°C)  {:>3}%  {:>4.1} m/s  {}",
        entry.time.with_timezone(&Local).format("%a %d %b %H:%M"),
        entry.temperature_c,
        entry.feels_like_c,
        entry.humidity_pct,
        entry.wind_speed_mps,
        entry.condition,
    )
}
