use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "SKYLINE_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Where the dashboard's backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Search box behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Candidate city names offered as autocomplete suggestions.
    pub cities: Vec<String>,
    pub max_suggestions: usize,
    /// How long suggestions stay open after the input loses focus.
    pub blur_grace_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cities: [
                "Colombo",
                "Kandy",
                "Galle",
                "Matara",
                "Jaffna",
                "Rathnapura",
                "Matale",
                "Mannar",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_suggestions: 6,
            blur_grace_ms: 200,
        }
    }
}

impl SearchConfig {
    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Show demo entries when the history fetch fails instead of an empty list.
    pub placeholder_on_error: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            placeholder_on_error: true,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [api]
/// base_url = "http://localhost:5000"
///
/// [search]
/// max_suggestions = 6
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub history: HistoryConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    /// `SKYLINE_API_URL` wins over the file.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            cfg.api.base_url = url;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyline", "skyline")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Parsed `api.base_url`; only http(s) is accepted.
    pub fn api_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid API base URL '{}'", self.api.base_url))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(anyhow!(
                "Invalid API base URL '{}': unsupported scheme '{other}'",
                self.api.base_url
            )),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.api_base_url()?;
        if self.search.max_suggestions == 0 {
            return Err(anyhow!("search.max_suggestions must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, DEFAULT_API_URL);
        assert_eq!(cfg.search.max_suggestions, 6);
        assert_eq!(cfg.search.blur_grace(), Duration::from_millis(200));
        assert!(cfg.history.placeholder_on_error);
        assert!(cfg.search.cities.iter().any(|c| c == "Matale"));
        cfg.validate().expect("defaults must validate");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config =
            toml::from_str("[api]\nbase_url = \"https://weather.example\"\n").unwrap();
        assert_eq!(cfg.api.base_url, "https://weather.example");
        assert_eq!(cfg.search.max_suggestions, 6);
        assert!(cfg.history.placeholder_on_error);
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut cfg = Config::default();
        cfg.api.base_url = "ftp://example.com".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn rejects_zero_suggestions() {
        let mut cfg = Config::default();
        cfg.search.max_suggestions = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = std::env::temp_dir().join(format!("skyline-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut cfg = Config::default();
        cfg.api.base_url = "http://10.0.0.2:8080".into();
        cfg.history.placeholder_on_error = false;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api.base_url, "http://10.0.0.2:8080");
        assert!(!loaded.history.placeholder_on_error);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("skyline-does-not-exist/config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.api.base_url, DEFAULT_API_URL);
    }
}
