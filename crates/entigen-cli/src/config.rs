//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The CLI
//! layer owns config; the core crate only sees the values derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site, not here)
//! 2. `ENTIGEN_*` environment variables, `__` between sections
//!    (`ENTIGEN_EMIT__HIVE_TYPE_ID=5`)
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use entigen_core::domain::{NamingConvention, UnsupportedShapePolicy};

const ENV_PREFIX: &str = "ENTIGEN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Class-name suffixes.
    pub naming: NamingConvention,
    pub emit: EmitConfig,
    pub inference: InferenceConfig,
    /// Default output folders.
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub hive: bool,
    pub hive_type_id: u32,
    /// Import path from the model folder to the entity folder. Derived from
    /// the two folders when unset.
    pub entity_import_prefix: Option<String>,
    /// Import path from the entity folder to the model folder.
    pub model_import_prefix: Option<String>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            hive: true,
            hive_type_id: 3,
            entity_import_prefix: None,
            model_import_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Fail on untypeable shapes instead of degrading to `dynamic`.
    pub strict: bool,
}

impl InferenceConfig {
    pub fn policy(&self, strict_flag: bool) -> UnsupportedShapePolicy {
        if strict_flag || self.strict {
            UnsupportedShapePolicy::FailFast
        } else {
            UnsupportedShapePolicy::Degrade
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub entity_dir: PathBuf,
    pub model_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            entity_dir: PathBuf::from("lib/domain/entities"),
            model_dir: PathBuf::from("lib/data/models"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Path of the active configuration file.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.entigen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "entigen", "entigen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".entigen.toml"))
    }

    /// Dotted-key lookup over the serialised configuration.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            value = value.get(part)?.clone();
        }
        Some(value)
    }
}
