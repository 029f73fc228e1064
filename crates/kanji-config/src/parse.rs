//! Configuration file parsing.
//!
//! Parses individual `.kanji.toml` files into `RawConfig` values whose fields
//! are all optional, so that partial files can be merged.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Data settings section.
    pub data: Option<RawDataSettings>,
}

/// Raw `[search]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Rows shown per query.
    pub limit: Option<usize>,
}

/// Raw `[data]` settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDataSettings {
    /// Record files. Accepts a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub files: Option<Vec<String>>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string. `path` is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> RawConfig {
        parse_config_str(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn empty_config() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.search.is_none());
        assert!(config.data.is_none());
    }

    #[test]
    fn search_limit() {
        let config = parse("[search]\nlimit = 20\n");
        assert_eq!(config.search.unwrap().limit, Some(20));
    }

    #[test]
    fn single_data_file() {
        let config = parse("[data]\nfiles = \"kanji.json\"\n");
        assert_eq!(config.data.unwrap().files, Some(vec!["kanji.json".into()]));
    }

    #[test]
    fn many_data_files() {
        let config = parse("[data]\nfiles = [\"a.json\", \"b.json\"]\n");
        assert_eq!(
            config.data.unwrap().files,
            Some(vec!["a.json".into(), "b.json".into()])
        );
    }

    #[test]
    fn empty_data_section() {
        let config = parse("[data]\n");
        assert!(config.data.unwrap().files.is_none());
    }

    #[test]
    fn wrong_type_is_an_error() {
        let err = parse_config_str("[search]\nlimit = \"ten\"\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("[search\n").is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = parse_config_file(Path::new("/nonexistent/.kanji.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
