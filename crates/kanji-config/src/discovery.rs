//! Configuration file discovery.
//!
//! Walks up the directory tree looking for `.kanji.toml` files, then appends
//! the global `~/.kanji.toml` unless a file marked `root = true` was reached.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".kanji.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global
/// (`~/.kanji.toml`) last. Discovery stops at the first file that sets
/// `root = true`; the global file is skipped in that case.
///
/// Returns an empty vector if no configuration files are found.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let config_path = dir.join(CONFIG_FILENAME);
        if !config_path.is_file() {
            continue;
        }
        let is_root = is_root_config(&config_path);
        configs.push(config_path);
        if is_root {
            return configs;
        }
    }

    if let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.kanji.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::TestDir;

    /// Discovered files minus the user's real global config, if any.
    fn local(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn no_configs() {
        let test_dir = TestDir::new();
        let subdir = test_dir.create_dir("a/b/c");

        let configs = discover_config_files(&subdir);
        assert!(local(&configs).is_empty());
    }

    #[test]
    fn closest_config_comes_first() {
        let test_dir = TestDir::new();
        let top = test_dir.create_config_at_root();
        let mid = test_dir.create_config("a/b");
        let leaf = test_dir.create_config("a/b/c/d");
        let working_dir = test_dir.create_dir("a/b/c/d/e");

        let configs = discover_config_files(&working_dir);
        assert_eq!(local(&configs), vec![&leaf, &mid, &top]);
    }

    #[test]
    fn config_in_cwd_is_found() {
        let test_dir = TestDir::new();
        let config = test_dir.create_config_at_root();

        let configs = discover_config_files(test_dir.path());
        assert_eq!(local(&configs), vec![&config]);
    }

    #[test]
    fn directory_named_like_config_is_skipped() {
        let test_dir = TestDir::new();
        fs::create_dir_all(test_dir.path().join(CONFIG_FILENAME)).unwrap();
        let subdir = test_dir.create_dir("subdir");

        let configs = discover_config_files(&subdir);
        assert!(local(&configs).is_empty());
    }

    #[test]
    fn root_config_stops_discovery() {
        let test_dir = TestDir::new();
        test_dir.create_config_at_root();
        let root = test_dir.create_root_config("project");
        let child = test_dir.create_config("project/sub");
        let working_dir = test_dir.create_dir("project/sub/deep");

        // No parent and no global config past the root marker.
        let configs = discover_config_files(&working_dir);
        assert_eq!(configs, vec![child, root]);
    }

    #[test]
    fn root_false_does_not_stop_discovery() {
        let test_dir = TestDir::new();
        let parent = test_dir.create_config_at_root();
        let mid = test_dir.create_config_with_content("project", "root = false\n");
        let working_dir = test_dir.create_dir("project/src");

        let configs = discover_config_files(&working_dir);
        assert_eq!(local(&configs), vec![&mid, &parent]);
    }

    #[test]
    fn global_path_uses_config_filename() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.kanji.toml")));
    }
}
