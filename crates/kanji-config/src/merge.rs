//! Configuration merging.
//!
//! Merges several `RawConfig` files into one resolved `Config`.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, DataSettings, SearchSettings,
    parse::{RawConfig, RawSearchSettings},
    resolve::resolve_data_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory holding the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges configuration files into a single `Config`.
///
/// Configs are given highest precedence first (closest to the working
/// directory) and the global config last.
///
/// Merge rules:
/// - Scalar settings: first defined value wins
/// - Data files: taken whole from the first config that lists any, resolved
///   against that config's directory
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(first) = configs.first() else {
        return Ok(Config::default());
    };

    Ok(Config {
        search: merge_search_settings(configs),
        data: merge_data_settings(configs)?,
        config_root: Some(first.dir().to_path_buf()),
    })
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    // Lowest precedence first so closer files overwrite
    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
}

/// Picks the data files from the highest-precedence config defining them.
fn merge_data_settings(configs: &[ParsedConfig]) -> Result<DataSettings, ConfigError> {
    let defining = configs.iter().find_map(|parsed| {
        parsed
            .config
            .data
            .as_ref()
            .and_then(|data| data.files.as_ref())
            .map(|files| (parsed, files))
    });

    let Some((parsed, files)) = defining else {
        return Ok(DataSettings::default());
    };

    let files = files
        .iter()
        .map(|file| resolve_data_path(file, parsed.dir()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DataSettings {
        files,
        source: Some(parsed.path.clone()),
    })
}
