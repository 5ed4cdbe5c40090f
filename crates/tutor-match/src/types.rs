//! Data structures shared by the matching stages.

use serde::Serialize;

use crate::CorpusEntry;

/// How a [`MatchResult`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The query is a substring of the question.
    Exact,
    /// A keyword and the query contain one another.
    Keyword,
    /// Approximate lexical similarity.
    Fuzzy,
}

impl MatchKind {
    /// Lowercase label used in output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Keyword => "keyword",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// A scored candidate produced by one of the matchers.
///
/// Results borrow the entry they point at, so they live no longer than the index.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchResult<'a> {
    /// The matched corpus entry.
    pub entry: &'a CorpusEntry,
    /// Confidence in `[0, 1]`.
    pub score: f32,
    /// Which matcher produced the result.
    pub kind: MatchKind,
}

impl MatchResult<'_> {
    /// Question text of the matched entry.
    pub fn question(&self) -> &str {
        &self.entry.question
    }

    /// Answer text of the matched entry.
    pub fn answer(&self) -> &str {
        &self.entry.answer
    }

    /// Id of the topic owning the matched entry.
    pub fn topic(&self) -> &str {
        &self.entry.topic
    }
}

/// A topic as listed to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    /// Topic id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Number of questions in the topic.
    pub question_count: usize,
}
