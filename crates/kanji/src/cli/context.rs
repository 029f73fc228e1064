//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use kanji_config::Config;
use kanji_query::Kanji;

use crate::data::load_all;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found or read).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by commands that work on the query alone, and by `init`, which
    /// must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Files to load: `overrides` (relative to the working directory) when
    /// given, otherwise the configured data files.
    pub fn data_files(&self, overrides: &[PathBuf]) -> Vec<PathBuf> {
        if overrides.is_empty() {
            self.config.data.files.clone()
        } else {
            overrides.iter().map(|path| self.cwd.join(path)).collect()
        }
    }

    /// Loads every record from the selected data files.
    pub fn records(&self, overrides: &[PathBuf]) -> Result<Vec<Kanji>, ExitCode> {
        let files = self.data_files(overrides);
        if files.is_empty() {
            eprintln!("error: no data files configured");
            eprintln!("Pass --data FILE, or run 'kanji init' and list files under [data].");
            return Err(ExitCode::FAILURE);
        }

        load_all(&files).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(files: Vec<PathBuf>) -> CommandContext {
        let mut config = Config::default();
        config.data.files = files;
        CommandContext {
            cwd: PathBuf::from("/work"),
            config,
        }
    }

    #[test]
    fn overrides_replace_config_files() {
        let ctx = context(vec![PathBuf::from("/data/all.json")]);
        assert_eq!(
            ctx.data_files(&[PathBuf::from("mine.json")]),
            vec![PathBuf::from("/work/mine.json")]
        );
        assert_eq!(ctx.data_files(&[]), vec![PathBuf::from("/data/all.json")]);
    }

    #[test]
    fn absolute_overrides_are_kept() {
        let ctx = context(Vec::new());
        assert_eq!(
            ctx.data_files(&[PathBuf::from("/abs/k.json")]),
            vec![PathBuf::from("/abs/k.json")]
        );
    }

    #[test]
    fn no_files_is_an_error() {
        let ctx = context(Vec::new());
        assert!(ctx.records(&[]).is_err());
    }
}
