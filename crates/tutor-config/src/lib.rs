//! Configuration system for tutor.
//!
//! tutor uses TOML configuration files named `.tutor.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.tutor.toml` files found, then loading `~/.tutor.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
#[cfg(test)]
mod test_support;
mod templates;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawKnowledgeSettings, RawMatchSettings, parse_config_file, parse_config_str,
};
pub use resolve::{format_path_for_display, resolve_knowledge_path};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default knowledge directory, relative to the defining config file (or the working
/// directory when no config file sets it).
pub const DEFAULT_KNOWLEDGE_DIR: &str = "knowledge";

/// Default score a ranked result must exceed to be accepted as an answer.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f32 = 0.3;

/// Default maximum fuzzy distance for a candidate to be returned at all.
pub const DEFAULT_FUZZY_THRESHOLD: f32 = 0.4;

/// Default number of fuzzy candidates kept per query.
pub const DEFAULT_FUZZY_LIMIT: usize = 3;

/// Default Levenshtein edit budget per query term.
pub const DEFAULT_FUZZY_DISTANCE: u8 = 2;

/// Largest edit budget the Levenshtein automaton builder is allowed to use.
///
/// Building the automaton tables grows steeply with the budget; at 4 it takes seconds.
pub const MAX_FUZZY_DISTANCE: u8 = 3;

/// Default number of topics suggested on a fallback response.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Top-level merged configuration for tutor.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.tutor.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the knowledge base lives and how it is loaded.
    pub knowledge: KnowledgeSettings,
    /// Matching and ranking parameters (`[match]` in TOML).
    pub matching: MatchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.tutor.toml` files.
    ///
    /// Files nearer to `cwd` override farther ones, and `~/.tutor.toml` has the lowest
    /// precedence. With no files at all the defaults apply.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads and layers the given config files.
    ///
    /// `files` must be ordered nearest first, as [`discover_config_files`] returns them.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Returns the knowledge directory as an absolute path.
    ///
    /// Paths set by a config file are already absolute; the built-in default is
    /// resolved against `cwd`.
    pub fn knowledge_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.knowledge.path)
    }

    /// Checks settings that parse but will not work, relative to `cwd`.
    ///
    /// `cwd` is used to resolve the default knowledge directory.
    pub fn validate(&self, cwd: &Path) -> Vec<ConfigWarning> {
        validate_config(self, cwd)
    }

    /// Renders the effective settings as TOML.
    ///
    /// The output uses the same layout as a `.tutor.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, toml::ser::Error> {
        let serializable = SerializableSettings {
            knowledge: SerializableKnowledge {
                path: self.knowledge.path.display().to_string(),
                topics: self.knowledge.topics.clone(),
                strict: self.knowledge.strict,
            },
            matching: self.matching.clone(),
        };
        toml::to_string_pretty(&serializable)
    }
}

/// Settings describing the knowledge base on disk.
#[derive(Debug, Clone)]
pub struct KnowledgeSettings {
    /// Directory holding one `<topic-id>.json` file per topic.
    pub path: PathBuf,
    /// Ordered topic ids to load. Empty means "every JSON file in `path`".
    pub topics: Vec<String>,
    /// Fail instead of skipping topic files that cannot be loaded.
    pub strict: bool,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_KNOWLEDGE_DIR),
            topics: Vec::new(),
            strict: false,
        }
    }
}

/// Matching and ranking parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchSettings {
    /// A top result must score strictly above this to be returned as an answer.
    pub acceptance_threshold: f32,
    /// Fuzzy candidates with a distance above this are discarded.
    pub fuzzy_threshold: f32,
    /// Maximum fuzzy candidates kept per query.
    pub fuzzy_limit: usize,
    /// Levenshtein edit budget per query term.
    pub fuzzy_distance: u8,
    /// Maximum topics suggested on fallback.
    pub suggestion_limit: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            fuzzy_limit: DEFAULT_FUZZY_LIMIT,
            fuzzy_distance: DEFAULT_FUZZY_DISTANCE,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

/// TOML shape of [`Config::settings_to_toml`].
#[derive(Serialize)]
struct SerializableSettings {
    /// Knowledge settings.
    knowledge: SerializableKnowledge,
    /// Match settings.
    #[serde(rename = "match")]
    matching: MatchSettings,
}

/// Knowledge settings with the path rendered as a string.
#[derive(Serialize)]
struct SerializableKnowledge {
    /// Knowledge directory.
    path: String,
    /// Ordered topic ids.
    topics: Vec<String>,
    /// Strict loading flag.
    strict: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_settings_defaults() {
        let settings = MatchSettings::default();
        assert!((settings.acceptance_threshold - 0.3).abs() < f32::EPSILON);
        assert!((settings.fuzzy_threshold - 0.4).abs() < f32::EPSILON);
        assert_eq!(settings.fuzzy_limit, 3);
        assert_eq!(settings.fuzzy_distance, 2);
        assert_eq!(settings.suggestion_limit, 5);
    }

    #[test]
    fn test_knowledge_settings_defaults() {
        let knowledge = KnowledgeSettings::default();
        assert_eq!(knowledge.path, PathBuf::from("knowledge"));
        assert!(knowledge.topics.is_empty());
        assert!(!knowledge.strict);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.config_root.is_none());
        assert_eq!(
            config.knowledge_dir(Path::new("/srv/tutor")),
            PathBuf::from("/srv/tutor/knowledge")
        );
    }

    #[test]
    fn test_knowledge_dir_keeps_absolute_path() {
        let config = Config {
            knowledge: KnowledgeSettings {
                path: PathBuf::from("/data/kb"),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.knowledge_dir(Path::new("/elsewhere")),
            PathBuf::from("/data/kb")
        );
    }

    #[test]
    fn test_settings_to_toml() {
        let config = Config::default();
        let toml = config.settings_to_toml().unwrap();

        assert!(toml.contains("[knowledge]"));
        assert!(toml.contains("[match]"));
        assert!(toml.contains("path = \"knowledge\""));
        assert!(toml.contains("fuzzy_limit = 3"));
        assert!(toml.contains("suggestion_limit = 5"));

        let parsed: toml::Value =
            toml::from_str(&toml).expect("settings_to_toml should produce valid TOML");
        assert!(parsed.get("knowledge").is_some());
        assert!(parsed.get("match").is_some());
    }
}
