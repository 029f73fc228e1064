//! Path resolution for data files.

use std::path::{Component, Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a data file path from a config file.
///
/// - Tilde paths (`~/kanji.json`) are expanded to the home directory
/// - Relative paths are joined onto `config_dir`
/// - Absolute paths are returned as-is
///
/// The file does not need to exist; missing files are reported by validation.
pub fn resolve_data_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(normalize(&config_dir.join(expanded)))
    }
}

/// Formats a path for display, relative to `base` when it is a descendant,
/// otherwise with the home directory abbreviated to `~`.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base
        && let Some(relative) = pathdiff::diff_paths(path, base)
        && !relative.starts_with("..")
        && relative.is_relative()
    {
        if relative.as_os_str().is_empty() {
            return String::from(".");
        }
        return relative.display().to_string();
    }

    if let Some(dirs) = BaseDirs::new()
        && let Ok(rest) = path.strip_prefix(dirs.home_dir())
    {
        return Path::new("~").join(rest).display().to_string();
    }

    path.display().to_string()
}

/// Expands a leading `~` or `~/` to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Removes `.` components and folds `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push(component);
                }
            }
            other => result.push(other),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_joins_config_dir() {
        let resolved = resolve_data_path("./data/kanji.json", Path::new("/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/project/data/kanji.json"));
    }

    #[test]
    fn parent_relative_path_is_folded() {
        let resolved = resolve_data_path("../shared/kanji.json", Path::new("/project/app")).unwrap();
        assert_eq!(resolved, PathBuf::from("/project/shared/kanji.json"));
    }

    #[test]
    fn absolute_path_is_kept() {
        let resolved = resolve_data_path("/data/kanji.json", Path::new("/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/data/kanji.json"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = home_dir().unwrap();
        let resolved = resolve_data_path("~/kanji.json", Path::new("/project")).unwrap();
        assert_eq!(resolved, home.join("kanji.json"));
        assert_eq!(expand_tilde("~").unwrap(), home);
    }

    #[test]
    fn tilde_in_middle_is_literal() {
        let resolved = resolve_data_path("a~/b.json", Path::new("/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/project/a~/b.json"));
    }

    #[test]
    fn display_relative_to_base() {
        let shown = format_path_for_display(
            Path::new("/project/data/kanji.json"),
            Some(Path::new("/project")),
        );
        assert_eq!(shown, "data/kanji.json");
        assert_eq!(
            format_path_for_display(Path::new("/project"), Some(Path::new("/project"))),
            "."
        );
    }

    #[test]
    fn display_outside_base_is_not_relative() {
        let shown = format_path_for_display(
            Path::new("/elsewhere/kanji.json"),
            Some(Path::new("/project")),
        );
        assert_eq!(shown, "/elsewhere/kanji.json");
    }

    #[test]
    fn display_abbreviates_home() {
        let home = home_dir().unwrap();
        let shown = format_path_for_display(&home.join("kanji.json"), None);
        assert_eq!(shown, Path::new("~").join("kanji.json").display().to_string());
    }
}
