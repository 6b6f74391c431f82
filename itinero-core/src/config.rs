use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use crate::provider::ServiceId;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HOTEL_RADIUS_M: u32 = 5_000;

/// Per-service overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [services.openweather]
    /// api_key = ".."
    #[serde(default)]
    pub services: HashMap<String, ServiceConfig>,

    /// Upper bound for every outbound call, in seconds.
    pub timeout_secs: Option<u64>,

    /// Search radius around the destination for hotels, in meters.
    pub hotel_radius_m: Option<u32>,

    /// JSON file mapping destination names to a review. The bundled set is used when unset.
    pub reviews_path: Option<PathBuf>,
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
        let dirs = ProjectDirs::from("dev", "itinero", "itinero")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn service_config(&self, id: ServiceId) -> Option<&ServiceConfig> {
        self.services.get(id.as_str())
    }

    /// Returns API key for a service, if present.
    pub fn api_key(&self, id: ServiceId) -> Option<&str> {
        self.service_config(id).and_then(|cfg| cfg.api_key.as_deref())
    }

    pub fn upsert_api_key(&mut self, id: ServiceId, api_key: String) {
        self.services.entry(id.as_str().to_string()).or_default().api_key = Some(api_key);
    }

    pub fn set_base_url(&mut self, id: ServiceId, base_url: Option<String>) {
        self.services.entry(id.as_str().to_string()).or_default().base_url = base_url;
    }

    /// Configured base URL, falling back to the public endpoint of the service.
    pub fn base_url(&self, id: ServiceId) -> Result<Url> {
        let raw = self
            .service_config(id)
            .and_then(|cfg| cfg.base_url.as_deref())
            .unwrap_or_else(|| id.default_base_url());

        Url::parse(raw).with_context(|| format!("Invalid base URL for service '{id}': {raw}"))
    }

    pub fn is_service_configured(&self, id: ServiceId) -> bool {
        !id.requires_api_key() || self.api_key(id).is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn hotel_radius_m(&self) -> u32 {
        self.hotel_radius_m.unwrap_or(DEFAULT_HOTEL_RADIUS_M)
    }
}
