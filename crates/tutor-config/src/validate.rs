//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::Path};

use crate::{Config, MAX_FUZZY_DISTANCE};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// The knowledge directory does not exist.
    KnowledgePathMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The knowledge path exists but is not a directory.
    KnowledgePathNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// A threshold lies outside the closed unit interval.
    ThresholdOutOfRange {
        /// Name of the setting.
        setting: &'static str,
        /// Configured value.
        value: f32,
    },
    /// The fuzzy edit budget is larger than the automaton supports.
    FuzzyDistanceTooLarge {
        /// Configured value.
        value: u8,
    },
    /// A limit is zero, which disables the feature it bounds.
    ZeroLimit {
        /// Name of the setting.
        setting: &'static str,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KnowledgePathMissing { path } => {
                write!(f, "knowledge directory does not exist: {path}")
            }
            Self::KnowledgePathNotDirectory { path } => {
                write!(f, "knowledge path is not a directory: {path}")
            }
            Self::ThresholdOutOfRange { setting, value } => {
                write!(f, "match.{setting} must be between 0 and 1, got {value}")
            }
            Self::FuzzyDistanceTooLarge { value } => {
                write!(
                    f,
                    "match.fuzzy_distance must be at most {MAX_FUZZY_DISTANCE}, got {value}"
                )
            }
            Self::ZeroLimit { setting } => {
                write!(f, "match.{setting} is 0")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - A knowledge directory that doesn't exist or isn't a directory
/// - Thresholds outside `[0, 1]`
/// - A fuzzy edit budget above [`MAX_FUZZY_DISTANCE`]
/// - Zero fuzzy or suggestion limits
pub fn validate_config(config: &Config, cwd: &Path) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let knowledge_dir = config.knowledge_dir(cwd);
    if !knowledge_dir.exists() {
        warnings.push(ConfigWarning::KnowledgePathMissing {
            path: knowledge_dir.display().to_string(),
        });
    } else if !knowledge_dir.is_dir() {
        warnings.push(ConfigWarning::KnowledgePathNotDirectory {
            path: knowledge_dir.display().to_string(),
        });
    }

    let matching = &config.matching;
    for (setting, value) in [
        ("acceptance_threshold", matching.acceptance_threshold),
        ("fuzzy_threshold", matching.fuzzy_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            warnings.push(ConfigWarning::ThresholdOutOfRange { setting, value });
        }
    }

    if matching.fuzzy_distance > MAX_FUZZY_DISTANCE {
        warnings.push(ConfigWarning::FuzzyDistanceTooLarge {
            value: matching.fuzzy_distance,
        });
    }

    for (setting, value) in [
        ("fuzzy_limit", matching.fuzzy_limit),
        ("suggestion_limit", matching.suggestion_limit),
    ] {
        if value == 0 {
            warnings.push(ConfigWarning::ZeroLimit { setting });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{KnowledgeSettings, MatchSettings, test_support::Scratch};

    /// Builds a config pointing at `path` with the given match settings.
    fn config_at(path: PathBuf, matching: MatchSettings) -> Config {
        Config {
            knowledge: KnowledgeSettings {
                path,
                ..Default::default()
            },
            matching,
            config_root: None,
        }
    }

    #[test]
    fn test_validate_clean_config() {
        let dir = Scratch::new();
        dir.dir("knowledge");

        let warnings = Config::default().validate(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_validate_missing_knowledge_dir() {
        let dir = Scratch::new();

        let warnings = Config::default().validate(dir.path());
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::KnowledgePathMissing { .. }]
        ));
    }

    #[test]
    fn test_validate_knowledge_path_is_file() {
        let dir = Scratch::new();
        let file = dir.write("knowledge.json", "{}");

        let warnings = config_at(file, MatchSettings::default()).validate(dir.path());
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::KnowledgePathNotDirectory { .. }]
        ));
    }

    #[test]
    fn test_validate_match_settings() {
        let dir = Scratch::new();
        let kb = dir.dir("kb");
        let matching = MatchSettings {
            acceptance_threshold: 1.5,
            fuzzy_threshold: -0.1,
            fuzzy_distance: 9,
            fuzzy_limit: 0,
            suggestion_limit: 0,
        };

        let warnings = config_at(kb, matching).validate(dir.path());

        assert_eq!(warnings.len(), 5);
        assert!(warnings.contains(&ConfigWarning::ThresholdOutOfRange {
            setting: "acceptance_threshold",
            value: 1.5,
        }));
        assert!(warnings.contains(&ConfigWarning::FuzzyDistanceTooLarge { value: 9 }));
        assert!(warnings.contains(&ConfigWarning::ZeroLimit {
            setting: "suggestion_limit"
        }));
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::KnowledgePathMissing {
            path: "/srv/kb".into(),
        };
        assert_eq!(
            warning.to_string(),
            "knowledge directory does not exist: /srv/kb"
        );

        let warning = ConfigWarning::FuzzyDistanceTooLarge { value: 7 };
        assert_eq!(
            warning.to_string(),
            "match.fuzzy_distance must be at most 3, got 7"
        );
    }
}
