//! Configuration file discovery.
//!
//! Every directory from the working directory up to the filesystem root may hold a
//! `.tutor.toml`. The global `~/.tutor.toml` comes last unless a file on the way up set
//! `root = true`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".tutor.toml";

/// Lists the configuration files that apply in `cwd`, nearest first.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        configs.push(candidate);
        if stop {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        configs.push(global);
    }

    configs
}

/// Path of the global configuration file, if the home directory is known.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Returns true when `path` is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
