//! Response composition.
//!
//! Turns the ranked results for a query into the single [`ChatResponse`] a caller
//! receives: the best answer, a fallback with topic suggestions, or an error prompt.

use serde::Serialize;
use tutor_corpus::Topic;

use crate::{MatchResult, MessagePicker, rank::accepted};

/// Reply for an empty or whitespace-only query.
pub const BLANK_QUERY_MESSAGE: &str = "Please type a question or pick a topic from the list.";

/// Replies used when no answer clears the acceptance threshold.
pub const FALLBACK_MESSAGES: [&str; 4] = [
    "I'm not sure I understood the question. Try rephrasing it or pick a topic below.",
    "I couldn't find an answer to that. These topics might help:",
    "That question isn't covered yet. Have a look at these topics:",
    "Try asking about one of these topics:",
];

/// What kind of reply a [`ChatResponse`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// A stored answer.
    Answer,
    /// No confident match; see the suggestions.
    Fallback,
    /// The query could not be processed.
    Error,
}

/// A topic offered to the user after a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSuggestion {
    /// Topic id.
    pub id: String,
    /// Display title.
    pub title: String,
}

/// The reply to one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    /// Text shown to the user.
    pub answer: String,
    /// Topic of the answer, for answers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Reply kind.
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    /// Score of the winning result, for answers only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Suggested topics, for fallbacks only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<TopicSuggestion>>,
}

impl ChatResponse {
    /// The reply to a blank query.
    pub fn blank_query() -> Self {
        Self {
            answer: BLANK_QUERY_MESSAGE.to_string(),
            topic: None,
            kind: ResponseKind::Error,
            confidence: None,
            suggestions: None,
        }
    }
}

/// Builds the reply for already ranked results.
///
/// The top result is returned when its score is strictly above `threshold`. Otherwise a
/// fallback message is chosen with `picker` and the first `suggestion_limit` topics are
/// suggested in knowledge-base order.
pub fn compose(
    ranked: &[MatchResult<'_>],
    threshold: f32,
    topics: &[Topic],
    suggestion_limit: usize,
    picker: &dyn MessagePicker,
) -> ChatResponse {
    if let Some(top) = accepted(ranked, threshold) {
        return ChatResponse {
            answer: top.answer().to_string(),
            topic: Some(top.topic().to_string()),
            kind: ResponseKind::Answer,
            confidence: Some(top.score),
            suggestions: None,
        };
    }

    let message = FALLBACK_MESSAGES[picker.pick(FALLBACK_MESSAGES.len()) % FALLBACK_MESSAGES.len()];
    let suggestions = topics
        .iter()
        .take(suggestion_limit)
        .map(|topic| TopicSuggestion {
            id: topic.id.clone(),
            title: topic.title.clone(),
        })
        .collect();

    ChatResponse {
        answer: message.to_string(),
        topic: None,
        kind: ResponseKind::Fallback,
        confidence: None,
        suggestions: Some(suggestions),
    }
}
