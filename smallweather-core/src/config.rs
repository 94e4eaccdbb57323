use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::city::{DEFAULT_SEARCH_LIMIT, Dataset};

/// Environment variable that overrides the API key from the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// search_limit = 8
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Alternative forecast endpoint.
    pub forecast_url: Option<String>,

    /// City CSV to use instead of the bundled one.
    pub dataset_path: Option<PathBuf>,

    /// How many suggestions city search returns.
    pub search_limit: Option<usize>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "smallweather", "smallweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the config file.
    pub fn api_key(&self) -> Option<String> {
        self.resolve_api_key(env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Option<String> {
        let present = |key: &String| !key.trim().is_empty();

        from_env
            .filter(present)
            .or_else(|| self.api_key.clone().filter(present))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }

    /// The configured dataset file, or the bundled one.
    pub fn dataset(&self) -> Result<Dataset> {
        match &self.dataset_path {
            Some(path) => Dataset::from_path(path),
            None => Ok(Dataset::embedded()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_key_and_default_limit() {
        let cfg = Config::default();

        assert_eq!(cfg.resolve_api_key(None), None);
        assert_eq!(cfg.search_limit(), DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn env_key_wins_over_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        assert_eq!(cfg.resolve_api_key(Some("ENV_KEY".into())).as_deref(), Some("ENV_KEY"));
        assert_eq!(cfg.resolve_api_key(None).as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());

        assert_eq!(cfg.resolve_api_key(None), None);
    }

    #[test]
    fn blank_env_key_falls_back_to_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        assert_eq!(cfg.resolve_api_key(Some("".into())).as_deref(), Some("FILE_KEY"));
        assert_eq!(cfg.resolve_api_key(Some("  ".into())).as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn parses_toml() {
        let cfg = Config::from_toml(
            r#"
            api_key = "abc"
            forecast_url = "http://localhost:8080/forecast"
            dataset_path = "/tmp/cities.csv"
            search_limit = 8
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.forecast_url.as_deref(), Some("http://localhost:8080/forecast"));
        assert_eq!(cfg.dataset_path, Some(PathBuf::from("/tmp/cities.csv")));
        assert_eq!(cfg.search_limit(), 8);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = Config {
            api_key: Some("abc".into()),
            search_limit: Some(3),
            ..Config::default()
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(Config::from_toml("search_limit = \"many\"").is_err());
    }

    #[test]
    fn dataset_defaults_to_embedded() {
        let ds = Config::default().dataset().unwrap();
        assert_eq!(ds.len(), Dataset::embedded().len());
    }

    #[test]
    fn dataset_path_replaces_embedded_list() {
        let path = std::env::temp_dir().join(format!("smallweather-config-{}.csv", std::process::id()));
        fs::write(
            &path,
            "id,name,state,country,country_full,lat,lng\n1,Tromso,54,NO,Norway,69.6,18.9\n",
        )
        .unwrap();

        let cfg = Config {
            dataset_path: Some(path.clone()),
            ..Config::default()
        };
        let ds = cfg.dataset();
        fs::remove_file(&path).unwrap();

        let ds = ds.unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].name, "Tromso");
    }

    #[test]
    fn dataset_path_must_exist() {
        let cfg = Config {
            dataset_path: Some(PathBuf::from("/definitely/not/here.csv")),
            ..Config::default()
        };

        assert!(cfg.dataset().is_err());
    }
}
