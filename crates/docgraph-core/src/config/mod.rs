//! Configuration management for docgraph.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `docgraph.toml` file
//! 3. User config `~/.config/docgraph/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hierarchy inference configuration.
    pub hierarchy: HierarchyConfig,

    /// Content store configuration.
    pub store: StoreConfig,

    /// Embedding model configuration.
    pub embedding: EmbeddingConfig,

    /// Visualization configuration.
    pub visualization: VisualizationConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./docgraph.toml` (project local)
    /// 2. `~/.config/docgraph/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides and validation apply in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new("docgraph.toml").exists() {
            return Self::from_file("docgraph.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("docgraph").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Self::default().resolve(env_var)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.resolve(env_var)
    }

    /// Apply overrides from `lookup` and validate the result.
    fn resolve<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply_overrides(lookup)?;
        self.validate()?;
        Ok(self)
    }

    /// Apply `DOCGRAPH_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DOCGRAPH_INFER_HIERARCHY") {
            self.hierarchy.infer_hierarchy = parse_bool("DOCGRAPH_INFER_HIERARCHY", &value)?;
        }

        if let Some(dir) = lookup("DOCGRAPH_DATA_DIR") {
            self.store.data_dir = dir;
        }
        if let Some(value) = lookup("DOCGRAPH_RESET_STORE") {
            self.store.reset_on_start = parse_bool("DOCGRAPH_RESET_STORE", &value)?;
        }
        if let Some(size) = lookup("DOCGRAPH_BATCH_SIZE") {
            self.store.batch_size = size.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "DOCGRAPH_BATCH_SIZE must be a positive integer, got {:?}",
                    size
                ))
            })?;
        }

        if let Some(model) = lookup("DOCGRAPH_EMBEDDING_MODEL") {
            self.embedding.model = model;
        }

        Ok(())
    }

    /// Reject values no component can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.batch_size == 0 {
            return Err(ConfigError::Invalid("store.batch_size must be at least 1".to_string()));
        }
        if self.store.table.is_empty() {
            return Err(ConfigError::Invalid("store.table must not be empty".to_string()));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(format!("{} must be a boolean, got {:?}", name, other))),
    }
}

/// Hierarchy inference configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// When true, content always hangs off the last seen title.
    /// When false, an element's explicit `parent_id` wins if present.
    pub infer_hierarchy: bool,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            infer_hierarchy: DEFAULT_INFER_HIERARCHY,
        }
    }
}

/// Content store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base directory for docgraph data (default: ".docgraph").
    pub data_dir: String,

    /// Database directory name inside `data_dir`.
    pub db_dir: String,

    /// SurrealDB namespace.
    pub namespace: String,

    /// SurrealDB database.
    pub database: String,

    /// Table holding projected nodes.
    pub table: String,

    /// Truncate the node table before exporting.
    pub reset_on_start: bool,

    /// Records submitted per batch.
    pub batch_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            db_dir: DEFAULT_DB_DIR.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            table: DEFAULT_NODE_TABLE.to_string(),
            reset_on_start: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl StoreConfig {
    /// Get the full path to the database directory.
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.db_dir)
    }
}

/// Embedding model configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Model name, e.g. "bge-small-en-v1.5".
    pub model: String,

    /// Model cache directory. Defaults to `~/.docgraph/cache`.
    pub cache_dir: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            cache_dir: None,
        }
    }
}

/// Visualization configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    /// Directory rendered pages are written to.
    pub output_dir: String,

    /// Port for `docgraph serve`.
    pub port: u16,

    /// Open the browser when `docgraph serve` starts.
    pub open_browser: bool,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            port: DEFAULT_SERVE_PORT,
            open_browser: true,
        }
    }
}
