//! Topic data model and knowledge loading for tutor.
//!
//! A knowledge base is an ordered list of [`Topic`]s, each holding an ordered list of
//! [`QuestionRecord`]s. Topics are read once at startup from a directory of JSON files,
//! one file per topic:
//!
//! ```json
//! {
//!   "title": "Bayes' theorem",
//!   "description": "Conditional probability and its inversion",
//!   "questions": [
//!     { "question": "What is Bayes' theorem?", "answer": "...", "keywords": ["bayes"] }
//!   ]
//! }
//! ```
//!
//! The file stem is the topic id. Missing `title`, `description`, `questions` and
//! `keywords` fields fall back to the id, an empty string, and empty lists.

#![warn(missing_docs)]

mod error;
mod load;
mod topic_file;

pub use error::CorpusError;
pub use load::{Knowledge, LoadReport, SkippedTopic, discover_topic_ids, load_knowledge, load_topic_file};
use serde::Serialize;
pub use topic_file::parse_topic_str;

/// A named subject area grouping related question/answer records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Stable identifier (the topic file stem).
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short description shown in topic listings.
    pub description: String,
    /// Questions in file order.
    pub questions: Vec<QuestionRecord>,
}

impl Topic {
    /// Creates a topic whose title is its id and whose description is empty.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            description: String::new(),
            questions: Vec::new(),
        }
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a question.
    #[must_use]
    pub fn with_question(mut self, question: QuestionRecord) -> Self {
        self.questions.push(question);
        self
    }
}

/// A single stored question with its answer and keyword tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    /// Question text. Its exact value identifies the record during ranking.
    pub question: String,
    /// Answer returned when this record wins.
    pub answer: String,
    /// Keyword tags, possibly empty.
    pub keywords: Vec<String>,
}

impl QuestionRecord {
    /// Creates a record from its parts.
    pub fn new<K, S>(question: impl Into<String>, answer: impl Into<String>, keywords: K) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            answer: answer.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}
