//! Configuration system for kanji.
//!
//! kanji uses TOML configuration files named `.kanji.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.kanji.toml` files
//! found, then loading `~/.kanji.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
use kanji_query::RESULT_LIMIT;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawDataSettings, RawSearchSettings, parse_config_file, parse_config_str};
pub use resolve::{format_path_for_display, resolve_data_path};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Fully merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Search-related settings.
    pub search: SearchSettings,
    /// Record files to query.
    pub data: DataSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all `.kanji.toml` files that apply to
    /// `cwd`.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from an explicit list of config files, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Number of rows a search should show: the configured limit, capped at the engine's
    /// result limit.
    pub fn effective_limit(&self) -> usize {
        self.search.limit.min(RESULT_LIMIT)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings in `.kanji.toml` form.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            search: self.search.clone(),
            data: SerializableDataSettings {
                files: self
                    .data
                    .files
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect(),
            },
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Search-related settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Rows shown per query.
    pub limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: RESULT_LIMIT,
        }
    }
}

/// Record files to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSettings {
    /// Resolved absolute paths, in configured order.
    pub files: Vec<PathBuf>,
    /// Config file the list came from.
    pub source: Option<PathBuf>,
}

/// TOML shape of the effective settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Search-related settings.
    search: SearchSettings,
    /// Data settings with display paths.
    data: SerializableDataSettings,
}

/// Data settings as written to TOML.
#[derive(Serialize)]
struct SerializableDataSettings {
    /// Resolved data file paths.
    files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.search.limit, 50);
        assert!(config.data.files.is_empty());
        assert!(config.config_root.is_none());
    }

    #[test]
    fn effective_limit_is_capped() {
        let mut config = Config::default();
        config.search.limit = 10;
        assert_eq!(config.effective_limit(), 10);
        config.search.limit = 500;
        assert_eq!(config.effective_limit(), 50);
    }

    #[test]
    fn settings_to_toml_round_trips() {
        let config = Config {
            search: SearchSettings { limit: 20 },
            data: DataSettings {
                files: vec![PathBuf::from("/data/kanji.json")],
                source: None,
            },
            config_root: None,
        };
        let toml = config.settings_to_toml().unwrap();

        assert!(toml.contains("[search]"));
        assert!(toml.contains("limit = 20"));
        assert!(toml.contains("[data]"));
        assert!(toml.contains("/data/kanji.json"));

        let reparsed = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        assert_eq!(reparsed.search.and_then(|s| s.limit), Some(20));
        assert_eq!(
            reparsed.data.and_then(|d| d.files),
            Some(vec![String::from("/data/kanji.json")])
        );
    }
}
