//! Configuration merging.
//!
//! Layers parsed config files into one [`Config`]. Nearer files win, and a knowledge
//! path is resolved against the directory of the file that set it.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, KnowledgeSettings, MatchSettings,
    parse::{RawConfig, RawKnowledgeSettings, RawMatchSettings},
    resolve::resolve_knowledge_path,
};

/// One parsed file and where it came from.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file, used to resolve relative paths.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Layers `configs`, given nearest first, over the defaults.
///
/// - Scalar settings: the nearest file that sets one wins
/// - `knowledge.path`: resolved relative to the file that defines it
/// - `knowledge.topics`: the whole list from the highest-precedence file that sets it
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let knowledge = merge_knowledge_settings(configs)?;
    let matching = merge_match_settings(configs);
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        knowledge,
        matching,
        config_root,
    })
}

/// Merges knowledge settings, resolving the path against its defining file.
fn merge_knowledge_settings(configs: &[ParsedConfig]) -> Result<KnowledgeSettings, ConfigError> {
    let mut result = KnowledgeSettings::default();

    // Farthest first, so nearer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref knowledge) = parsed.config.knowledge {
            apply_raw_knowledge(&mut result, knowledge, parsed.dir())?;
        }
    }

    Ok(result)
}

/// Applies raw knowledge settings to result, overwriting any present values.
fn apply_raw_knowledge(
    result: &mut KnowledgeSettings,
    raw: &RawKnowledgeSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref path) = raw.path {
        result.path = resolve_knowledge_path(path, config_dir)?;
    }
    if let Some(ref topics) = raw.topics {
        result.topics.clone_from(topics);
    }
    if let Some(v) = raw.strict {
        result.strict = v;
    }
    Ok(())
}

/// Merges match settings.
fn merge_match_settings(configs: &[ParsedConfig]) -> MatchSettings {
    let mut result = MatchSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref matching) = parsed.config.matching {
            apply_raw_match(&mut result, matching);
        }
    }

    result
}

/// Applies raw match settings to result.
fn apply_raw_match(result: &mut MatchSettings, raw: &RawMatchSettings) {
    if let Some(v) = raw.acceptance_threshold {
        result.acceptance_threshold = v;
    }
    if let Some(v) = raw.fuzzy_threshold {
        result.fuzzy_threshold = v;
    }
    if let Some(v) = raw.fuzzy_limit {
        result.fuzzy_limit = v;
    }
    if let Some(v) = raw.fuzzy_distance {
        result.fuzzy_distance = v;
    }
    if let Some(v) = raw.suggestion_limit {
        result.suggestion_limit = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::parse_config_str, test_support::Scratch};

    /// Builds a `ParsedConfig` from TOML text located at `path`.
    fn parsed(path: &Path, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: path.to_path_buf(),
            config: parse_config_str(toml, path).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty() {
        let config = merge_configs(&[]).unwrap();
        assert!(config.config_root.is_none());
        assert_eq!(config.matching.fuzzy_limit, 3);
    }

    #[test]
    fn test_merge_scalar_precedence() {
        let dir = Scratch::new();
        let near = parsed(
            &dir.path().join("course/.tutor.toml"),
            "[match]\nacceptance_threshold = 0.5\n",
        );
        let far = parsed(
            &dir.path().join(".tutor.toml"),
            "[match]\nacceptance_threshold = 0.1\nfuzzy_limit = 7\n",
        );

        let config = merge_configs(&[near, far]).unwrap();

        assert!((config.matching.acceptance_threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.matching.fuzzy_limit, 7);
        assert_eq!(config.config_root, Some(dir.path().join("course")));
    }

    #[test]
    fn test_merge_resolves_path_against_defining_file() {
        let dir = Scratch::new();
        let shared_kb = dir.dir("shared/kb");
        let course = dir.dir("course");
        let near = parsed(&course.join(".tutor.toml"), "[match]\nfuzzy_limit = 1\n");
        let far = parsed(
            &dir.path().join("shared/.tutor.toml"),
            "[knowledge]\npath = \"kb\"\n",
        );

        let config = merge_configs(&[near, far]).unwrap();

        assert_eq!(config.knowledge.path, shared_kb.canonicalize().unwrap());
    }

    #[test]
    fn test_merge_topics_replaced_not_appended() {
        let dir = Scratch::new();
        let near = parsed(
            &dir.path().join("a/.tutor.toml"),
            "[knowledge]\ntopics = [\"bayes-theorem\"]\n",
        );
        let far = parsed(
            &dir.path().join(".tutor.toml"),
            "[knowledge]\ntopics = [\"production-rules\", \"knowledge-inference\"]\nstrict = true\n",
        );

        let config = merge_configs(&[near, far]).unwrap();

        assert_eq!(config.knowledge.topics, vec!["bayes-theorem"]);
        assert!(config.knowledge.strict);
    }
}
