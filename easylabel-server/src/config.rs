// easylabel-server/src/config.rs

use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub data_collection: String,
    pub metadata_collection: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 5000,
            data_dir: PathBuf::from("easylabel_data"),
            data_collection: "data".to_string(),
            metadata_collection: "metadata".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults.
    ///
    /// The path comes from `EASYLABEL_CONFIG` (default `easylabel.toml`).
    pub fn load() -> anyhow::Result<Config> {
        let config_path =
            std::env::var("EASYLABEL_CONFIG").unwrap_or_else(|_| "easylabel.toml".to_string());

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path))?;
            toml::from_str(&content).with_context(|| format!("failed to parse {}", config_path))
        } else {
            warn!("config file not found, using defaults");
            Ok(Config::default())
        }
    }
}
