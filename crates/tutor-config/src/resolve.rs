//! Path resolution for configured directories.
//!
//! Resolves relative and tilde-prefixed paths to absolute paths.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves the knowledge directory path to an absolute path.
///
/// Handles three cases:
/// - Tilde paths (`~/kb`) - expanded to home directory
/// - Relative paths (`./kb`, `../shared`) - resolved relative to `config_dir`
/// - Absolute paths (`/srv/kb`) - returned as-is
///
/// Existing paths are canonicalized. A missing directory is not an error here; it is
/// reported by validation and by the loader so that `tutor status` can still run.
pub fn resolve_knowledge_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(&expanded)
    };

    if !absolute.exists() {
        return Ok(absolute);
    }

    absolute
        .canonicalize()
        .map_err(|source| ConfigError::ResolveKnowledgePath {
            path: absolute.clone(),
            source,
        })
}

/// Formats a path for display, relative to `base` when possible and with the home
/// directory abbreviated to `~` otherwise.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base
        && let Ok(relative) = path.strip_prefix(base)
    {
        if relative.as_os_str().is_empty() {
            return ".".to_string();
        }
        return format!("./{}", relative.display());
    }

    if let Ok(home) = home_dir()
        && let Ok(relative) = path.strip_prefix(&home)
    {
        return format!("~/{}", relative.display());
    }

    path.display().to_string()
}

/// Replaces a leading `~` or `~/` with the home directory. Other paths pass through.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Home directory, or an error when it cannot be determined.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
