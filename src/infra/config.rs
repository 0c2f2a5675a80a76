//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument (parsed by the binary)
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// JSON file mapping region name -> list of polygons
    #[serde(default = "default_regions_file")]
    pub regions_file: String,
    /// CSV file of `word,value` sentiment pairs
    #[serde(default = "default_sentiments_file")]
    pub sentiments_file: String,
    /// Directory holding per-query message files and all_tweets.txt
    #[serde(default = "default_messages_dir")]
    pub messages_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            regions_file: default_regions_file(),
            sentiments_file: default_sentiments_file(),
            messages_dir: default_messages_dir(),
        }
    }
}

fn default_regions_file() -> String {
    "data/regions.json".to_string()
}

fn default_sentiments_file() -> String {
    "data/sentiments.csv".to_string()
}

fn default_messages_dir() -> String {
    "data".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EgressConfig {
    /// File path for region sentiment egress (JSONL format)
    #[serde(default = "default_egress_file")]
    pub file: String,
}

impl Default for EgressConfig {
    fn default() -> Self {
        Self { file: default_egress_file() }
    }
}

fn default_egress_file() -> String {
    "region_sentiments.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// Query used by `map` when none is given on the command line
    #[serde(default = "default_query")]
    pub default_query: String,
    /// Region used by `centered` when none is given
    #[serde(default = "default_center_region")]
    pub default_center_region: String,
    /// Number of regions listed by `centered`
    #[serde(default = "default_neighbor_count")]
    pub default_neighbor_count: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_query: default_query(),
            default_center_region: default_center_region(),
            default_neighbor_count: default_neighbor_count(),
        }
    }
}

fn default_query() -> String {
    "my job".to_string()
}

fn default_center_region() -> String {
    "TX".to_string()
}

fn default_neighbor_count() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub egress: EgressConfig,
    #[serde(default)]
    pub map: MapConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    regions_file: String,
    sentiments_file: String,
    messages_dir: String,
    egress_file: String,
    default_query: String,
    default_center_region: String,
    default_neighbor_count: usize,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default".to_string())
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        Self {
            regions_file: toml_config.data.regions_file,
            sentiments_file: toml_config.data.sentiments_file,
            messages_dir: toml_config.data.messages_dir,
            egress_file: toml_config.egress.file,
            default_query: toml_config.map.default_query,
            default_center_region: toml_config.map.default_center_region,
            default_neighbor_count: toml_config.map.default_neighbor_count,
            config_file,
        }
    }

    /// Config file path when none is given on the command line
    pub fn default_config_path() -> String {
        env::var("CONFIG_FILE").unwrap_or_else(|_| "config/dev.toml".to_string())
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if toml_config.map.default_neighbor_count == 0 {
            anyhow::bail!("map.default_neighbor_count must be > 0 in {}", path.display());
        }

        Ok(Self::from_toml(toml_config, path.display().to_string()))
    }

    /// Load configuration from a path, falling back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    /// Message file for a query: spaces become underscores
    pub fn messages_file_for(&self, query: &str) -> PathBuf {
        let stem: String = query
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        Path::new(&self.messages_dir).join(format!("{}.txt", stem))
    }

    /// Unfiltered message file, used when no per-query file exists
    pub fn all_messages_file(&self) -> PathBuf {
        Path::new(&self.messages_dir).join("all_tweets.txt")
    }

    pub fn regions_file(&self) -> &str {
        &self.regions_file
    }

    pub fn sentiments_file(&self) -> &str {
        &self.sentiments_file
    }

    pub fn messages_dir(&self) -> &str {
        &self.messages_dir
    }

    pub fn egress_file(&self) -> &str {
        &self.egress_file
    }

    pub fn default_query(&self) -> &str {
        &self.default_query
    }

    pub fn default_center_region(&self) -> &str {
        &self.default_center_region
    }

    pub fn default_neighbor_count(&self) -> usize {
        self.default_neighbor_count
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Builder method for tests to point at a data directory
    #[cfg(test)]
    pub fn with_messages_dir(mut self, dir: &str) -> Self {
        self.messages_dir = dir.to_string();
        self
    }
}
