//! Topic file parsing.

use std::path::Path;

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::{CorpusError, QuestionRecord, Topic};

/// Topic file as stored on disk. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTopic {
    /// Display title.
    title: Option<String>,
    /// Description.
    description: Option<String>,
    /// Questions in file order.
    questions: Option<Vec<RawQuestion>>,
}

/// One question entry in a topic file.
#[serde_as]
#[derive(Debug, Deserialize)]
struct RawQuestion {
    /// Question text.
    question: String,
    /// Answer text.
    answer: String,
    /// Keyword tags; a single string or a list.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    #[serde(default)]
    keywords: Option<Vec<String>>,
}

impl RawQuestion {
    /// Converts to a record, trimming keywords and dropping empty ones.
    fn into_record(self) -> QuestionRecord {
        let keywords = self
            .keywords
            .unwrap_or_default()
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>();
        QuestionRecord::new(self.question, self.answer, keywords)
    }
}

/// Parses topic JSON into a [`Topic`] with the given id.
///
/// The `path` parameter is used for error reporting.
pub fn parse_topic_str(id: &str, contents: &str, path: &Path) -> Result<Topic, CorpusError> {
    let raw: RawTopic = serde_json::from_str(contents).map_err(|source| CorpusError::ParseJson {
        path: path.to_path_buf(),
        source,
    })?;

    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| id.to_string());

    Ok(Topic {
        id: id.to_string(),
        title,
        description: raw.description.unwrap_or_default(),
        questions: raw
            .questions
            .unwrap_or_default()
            .into_iter()
            .map(RawQuestion::into_record)
            .collect(),
    })
}
