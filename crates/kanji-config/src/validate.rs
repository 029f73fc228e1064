//! Configuration validation.
//!
//! Reports non-fatal problems with a loaded configuration.

use std::fmt;

use kanji_query::RESULT_LIMIT;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No data files are configured.
    NoDataFiles,
    /// A configured data file does not exist or is not a file.
    DataFileMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The search limit exceeds what a query can return.
    LimitAboveCap {
        /// Configured limit.
        limit: usize,
        /// Engine cap.
        cap: usize,
    },
    /// The search limit is zero, so searches show nothing.
    ZeroLimit,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDataFiles => write!(f, "no data files are configured"),
            Self::DataFileMissing { path } => write!(f, "data file does not exist: {path}"),
            Self::LimitAboveCap { limit, cap } => {
                write!(f, "search limit {limit} is above the cap of {cap}; {cap} is used")
            }
            Self::ZeroLimit => write!(f, "search limit is 0; searches will show no results"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    match config.search.limit {
        0 => warnings.push(ConfigWarning::ZeroLimit),
        limit if limit > RESULT_LIMIT => warnings.push(ConfigWarning::LimitAboveCap {
            limit,
            cap: RESULT_LIMIT,
        }),
        _ => {}
    }

    if config.data.files.is_empty() {
        warnings.push(ConfigWarning::NoDataFiles);
    }

    for path in &config.data.files {
        if !path.is_file() {
            warnings.push(ConfigWarning::DataFileMissing {
                path: path.display().to_string(),
            });
        }
    }

    warnings
}
