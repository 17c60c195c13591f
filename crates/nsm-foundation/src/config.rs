//! Configuration surface for a migration run
//!
//! Rule authoring lives with the caller; this module only defines the shape
//! of a run's settings and a loader that layers a TOML file under
//! `NSMIGRATE_*` environment overrides.

use crate::error::{MigrateError, MigrateResult};
use crate::model::LegacyPrefixRule;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one migration invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationSettings {
    /// Ordered legacy-prefix rules; first match wins
    #[serde(default)]
    pub rules: Vec<LegacyPrefixRule>,

    /// Prefer `use` imports over fully qualified references during the
    /// reference pass; when set, redundant imports of renamed symbols are
    /// removed
    #[serde(default)]
    pub prefer_imports: bool,

    /// Directory holding the `_classmap.json` sidecar artifact
    #[serde(default = "default_classmap_dir")]
    pub classmap_dir: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            prefer_imports: false,
            classmap_dir: default_classmap_dir(),
            logging: LoggingSettings::default(),
        }
    }
}

fn default_classmap_dir() -> String {
    ".".to_string()
}

/// Logging level and output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl MigrationSettings {
    /// Load settings from an optional TOML file plus the environment.
    ///
    /// Precedence, lowest to highest: built-in defaults, the TOML file,
    /// `NSMIGRATE_*` environment variables.
    pub fn load(config_file: Option<&Path>) -> MigrateResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("NSMIGRATE_").split("__"))
            .extract()
            .map_err(|err| MigrateError::config(err.to_string()))
    }
}
