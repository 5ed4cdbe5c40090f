//! Reading single `.tutor.toml` files.
//!
//! Parses individual `.tutor.toml` files into intermediate `RawConfig` structures
//! where every setting is optional, so that partial files can be layered later.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// One `.tutor.toml` file as written, before layering.
///
/// Unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Stops discovery at this file; parent and global files are ignored.
    pub root: Option<bool>,
    /// Knowledge base section.
    pub knowledge: Option<RawKnowledgeSettings>,
    /// Matching section (`[match]`).
    #[serde(rename = "match")]
    pub matching: Option<RawMatchSettings>,
}

/// Raw knowledge settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawKnowledgeSettings {
    /// Knowledge directory, relative to the config file.
    pub path: Option<String>,
    /// Ordered topic ids. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub topics: Option<Vec<String>>,
    /// Fail on unreadable topic files instead of skipping them.
    pub strict: Option<bool>,
}

/// Raw matching settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawMatchSettings {
    /// Score a top result must exceed to be accepted.
    pub acceptance_threshold: Option<f32>,
    /// Maximum fuzzy distance for a candidate to be returned.
    pub fuzzy_threshold: Option<f32>,
    /// Maximum fuzzy candidates per query.
    pub fuzzy_limit: Option<usize>,
    /// Levenshtein edit budget per query term.
    pub fuzzy_distance: Option<u8>,
    /// Maximum topics suggested on fallback.
    pub suggestion_limit: Option<usize>,
}

/// Reads and parses the config file at `path`.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses config text; `path` only labels errors.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns true when the file at `path` sets `root = true`.
///
/// Unreadable or invalid files count as non-root.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
