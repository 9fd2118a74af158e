use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CITY: &str = "Delhi";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_base_url = "http://127.0.0.1:8000"
/// default_city = "Delhi"
/// request_timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root URL of the weather backend.
    pub api_base_url: String,

    /// City searched as soon as the dashboard opens.
    pub default_city: String,

    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Parsed backend URL.
    pub fn api_url(&self) -> Result<Url> {
        Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid backend URL in config: '{}'", self.api_base_url))
    }

    /// Validate and store a new backend URL.
    pub fn set_api_base_url(&mut self, url: &str) -> Result<()> {
        let parsed = Url::parse(url.trim())
            .with_context(|| format!("'{url}' is not a valid URL"))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!("Backend URL must use http or https, got '{}'", parsed.scheme()));
        }

        self.api_base_url = parsed.to_string();
        Ok(())
    }

    pub fn set_default_city(&mut self, city: &str) -> Result<()> {
        let city = city.trim();
        if city.is_empty() {
            return Err(anyhow!("Default city must not be empty"));
        }

        self.default_city = city.to_string();
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
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
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }
}

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
