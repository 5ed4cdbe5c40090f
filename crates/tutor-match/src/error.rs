//! Error types for the tutor-match crate.

use thiserror::Error;

/// Errors that abort building the corpus index.
///
/// These are startup failures: a knowledge base that cannot be indexed is never served.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Two topics share an id.
    #[error("duplicate topic id: {id}")]
    DuplicateTopic {
        /// The repeated id.
        id: String,
    },

    /// A question has no text to match against.
    #[error("question {position} in topic '{topic}' is blank")]
    BlankQuestion {
        /// Owning topic id.
        topic: String,
        /// One-based position of the question within the topic.
        position: usize,
    },

    /// The Levenshtein edit budget is larger than supported.
    #[error("fuzzy distance {value} exceeds the maximum of {max}")]
    FuzzyDistanceTooLarge {
        /// Configured value.
        value: u8,
        /// Largest supported value.
        max: u8,
    },

    /// A threshold lies outside `[0, 1]`.
    #[error("{setting} must be between 0 and 1, got {value}")]
    ThresholdOutOfRange {
        /// Name of the setting.
        setting: &'static str,
        /// Configured value.
        value: f32,
    },
}

/// Errors returned by topic lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No topic has the requested id.
    #[error("topic not found: {id}")]
    TopicNotFound {
        /// The requested id.
        id: String,
    },
}
