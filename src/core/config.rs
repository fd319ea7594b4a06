use crate::core::currency::CurrencyRecord;
use crate::core::date::DEFAULT_DATE_FORMAT;
use crate::core::query::RateQueryMode;
use crate::core::rate::CurrencyRate;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RemoteStoreConfig {
    pub base_url: String,
}

/// Records served by the in-process store.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MemoryStoreConfig {
    #[serde(default)]
    pub currencies: Vec<CurrencyRecord>,
    #[serde(default)]
    pub rates: Vec<CurrencyRate>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StoreConfig {
    pub remote: Option<RemoteStoreConfig>,
    pub memory: Option<MemoryStoreConfig>,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub rate_query: RateQueryMode,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "basefx", "basefx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
