//! Knowledge directory loading.
//!
//! Topics are read in a fixed order: the configured id list when one is given, otherwise
//! every `*.json` file directly inside the knowledge directory sorted by file stem. A
//! topic file that cannot be read or parsed is skipped and recorded in the
//! [`LoadReport`], unless strict loading is requested.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{CorpusError, Topic, topic_file::parse_topic_str};

/// File extension of topic files.
const TOPIC_EXTENSION: &str = "json";

/// Loaded topics plus a record of what was skipped.
#[derive(Debug, Clone, Default)]
pub struct Knowledge {
    /// Topics in load order.
    pub topics: Vec<Topic>,
    /// What happened while loading.
    pub report: LoadReport,
}

/// Summary of a knowledge load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Directory the topics were read from.
    pub directory: PathBuf,
    /// Topic files that could not be loaded.
    pub skipped: Vec<SkippedTopic>,
}

impl LoadReport {
    /// Returns true when every requested topic loaded.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A topic file that was skipped during a non-strict load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTopic {
    /// Topic id.
    pub id: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Loads the knowledge base from `dir`.
///
/// `topics` fixes the load order; when empty, topic files are discovered with
/// [`discover_topic_ids`]. With `strict` set, the first unloadable topic aborts the load.
pub fn load_knowledge(dir: &Path, topics: &[String], strict: bool) -> Result<Knowledge, CorpusError> {
    if !dir.is_dir() {
        return Err(CorpusError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    let ids = if topics.is_empty() {
        discover_topic_ids(dir)?
    } else {
        topics.to_vec()
    };

    let mut knowledge = Knowledge {
        topics: Vec::with_capacity(ids.len()),
        report: LoadReport {
            directory: dir.to_path_buf(),
            skipped: Vec::new(),
        },
    };

    for id in ids {
        match load_topic_file(dir, &id) {
            Ok(topic) => {
                debug!(topic = %topic.id, questions = topic.questions.len(), "loaded topic");
                knowledge.topics.push(topic);
            }
            Err(err) if !strict => {
                warn!(topic = %id, error = %err, "skipping topic file");
                knowledge.report.skipped.push(SkippedTopic {
                    id,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        topics = knowledge.topics.len(),
        skipped = knowledge.report.skipped.len(),
        directory = %dir.display(),
        "knowledge loaded"
    );

    Ok(knowledge)
}

/// Reads and parses `<dir>/<id>.json`.
pub fn load_topic_file(dir: &Path, id: &str) -> Result<Topic, CorpusError> {
    validate_topic_id(id)?;

    let path = dir.join(format!("{id}.{TOPIC_EXTENSION}"));
    let contents = fs::read_to_string(&path).map_err(|source| CorpusError::ReadFile {
        path: path.clone(),
        source,
    })?;

    parse_topic_str(id, &contents, &path)
}

/// Lists topic ids for every `*.json` file directly inside `dir`, sorted by id.
///
/// Hidden files and subdirectories are ignored.
pub fn discover_topic_ids(dir: &Path) -> Result<Vec<String>, CorpusError> {
    let mut ids = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|source| CorpusError::ReadDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() || is_hidden(entry.file_name()) {
            continue;
        }

        let path = entry.path();
        if path.extension() != Some(OsStr::new(TOPIC_EXTENSION)) {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(OsStr::to_str) {
            ids.push(stem.to_string());
        }
    }

    ids.sort();
    Ok(ids)
}

/// Rejects ids that would escape the knowledge directory.
fn validate_topic_id(id: &str) -> Result<(), CorpusError> {
    let invalid = id.trim().is_empty()
        || id.contains(['/', '\\'])
        || id == "."
        || id == "..";
    if invalid {
        return Err(CorpusError::InvalidTopicId { id: id.to_string() });
    }
    Ok(())
}

/// Checks whether a file name starts with a dot.
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writes a topic file into `dir`.
    fn write_topic(dir: &Path, id: &str, json: &str) {
        fs::write(dir.join(format!("{id}.json")), json).unwrap();
    }

    #[test]
    fn test_discover_sorted_json_only() {
        let tmp = tempfile::tempdir().unwrap();
        write_topic(tmp.path(), "uncertainty-methods", "{}");
        write_topic(tmp.path(), "bayes-theorem", "{}");
        fs::write(tmp.path().join("notes.txt"), "ignore me").unwrap();
        fs::write(tmp.path().join(".draft.json"), "{}").unwrap();
        fs::create_dir(tmp.path().join("nested.json")).unwrap();

        let ids = discover_topic_ids(tmp.path()).unwrap();

        assert_eq!(ids, vec!["bayes-theorem", "uncertainty-methods"]);
    }

    #[test]
    fn test_load_in_configured_order() {
        let tmp = tempfile::tempdir().unwrap();
        write_topic(tmp.path(), "a-topic", r#"{"title": "A"}"#);
        write_topic(tmp.path(), "b-topic", r#"{"title": "B"}"#);

        let order = vec!["b-topic".to_string(), "a-topic".to_string()];
        let knowledge = load_knowledge(tmp.path(), &order, false).unwrap();

        let ids: Vec<_> = knowledge.topics.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b-topic", "a-topic"]);
        assert!(knowledge.report.is_complete());
    }

    #[test]
    fn test_load_skips_broken_topic() {
        let tmp = tempfile::tempdir().unwrap();
        write_topic(tmp.path(), "good", r#"{"title": "Good"}"#);
        write_topic(tmp.path(), "broken", "{ nope");

        let knowledge = load_knowledge(tmp.path(), &[], false).unwrap();

        assert_eq!(knowledge.topics.len(), 1);
        assert_eq!(knowledge.topics[0].id, "good");
        assert_eq!(knowledge.report.skipped.len(), 1);
        assert_eq!(knowledge.report.skipped[0].id, "broken");
    }

    #[test]
    fn test_load_skips_missing_configured_topic() {
        let tmp = tempfile::tempdir().unwrap();
        write_topic(tmp.path(), "good", "{}");

        let order = vec!["missing".to_string(), "good".to_string()];
        let knowledge = load_knowledge(tmp.path(), &order, false).unwrap();

        assert_eq!(knowledge.topics.len(), 1);
        assert!(knowledge.report.skipped[0].reason.contains("missing.json"));
    }

    #[test]
    fn test_strict_load_fails() {
        let tmp = tempfile::tempdir().unwrap();
        write_topic(tmp.path(), "broken", "\"just text\"");

        let err = load_knowledge(tmp.path(), &[], true).unwrap_err();
        assert!(matches!(err, CorpusError::ParseJson { .. }));
    }

    #[test]
    fn test_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_knowledge(&tmp.path().join("absent"), &[], false).unwrap_err();
        assert!(matches!(err, CorpusError::MissingDirectory { .. }));
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let tmp = tempfile::tempdir().unwrap();
        for id in ["../secrets", "a/b", "", ".."] {
            let err = load_topic_file(tmp.path(), id).unwrap_err();
            assert!(matches!(err, CorpusError::InvalidTopicId { .. }), "{id}");
        }
    }
}
