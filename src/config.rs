//! Application configuration management.
//!
//! This module handles loading and saving the client configuration,
//! which covers the API endpoint and the credential storage location.
//!
//! Configuration is stored at `~/.config/dragonball-client/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::ApiError;

/// Application name used for config/data directory paths
const APP_NAME: &str = "dragonball-client";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Production API endpoint
const DEFAULT_SCHEME: &str = "https";
const DEFAULT_HOST: &str = "dragonball.keepcoding.education";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scheme: String,
    pub host: String,
    /// Overrides the platform data directory for credential storage.
    pub storage_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            storage_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Absolute URL for an endpoint path.
    pub fn api_url(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&format!("{}://{}{}", self.scheme, self.host, path))
            .map_err(|_| ApiError::MalformedUrl)
    }

    /// Directory holding the credentials file.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.storage_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
