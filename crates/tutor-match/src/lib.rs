//! Hybrid question matching for tutor.
//!
//! This crate answers free-text questions from a static knowledge base. It handles:
//! - Flattening topics into a searchable [`CorpusIndex`]
//! - Exact and keyword matching, optionally scoped to one topic
//! - Fuzzy matching with Levenshtein automata when nothing matched directly
//! - Deduplicating and ranking candidates from both matchers
//! - Composing the final [`ChatResponse`]
//!
//! # Example
//!
//! ```
//! use tutor_config::MatchSettings;
//! use tutor_corpus::{QuestionRecord, Topic};
//! use tutor_match::{FixedPicker, KnowledgeBase, ResponseKind};
//!
//! let topics = vec![Topic::new("bayes-theorem").with_question(QuestionRecord::new(
//!     "What is Bayes' theorem?",
//!     "P(A|B) = P(B|A) P(A) / P(B)",
//!     ["bayes", "probability"],
//! ))];
//!
//! let kb = KnowledgeBase::new(topics, MatchSettings::default())
//!     .unwrap()
//!     .with_picker(FixedPicker(0));
//!
//! let response = kb.respond("bayes theorem formula", None);
//! assert_eq!(response.kind, ResponseKind::Answer);
//! assert_eq!(response.confidence, Some(0.8));
//! ```

#![warn(missing_docs)]

mod error;
mod fuzzy;
mod index;
mod keyword;
mod knowledge_base;
mod picker;
mod rank;
mod response;
mod types;

pub use error::{IndexError, LookupError};
pub use fuzzy::{FuzzyCandidate, fuzzy_match};
pub use index::{CorpusEntry, CorpusIndex};
pub use keyword::{EXACT_SCORE, KEYWORD_SCORE, keyword_match};
pub use knowledge_base::{KnowledgeBase, MatchTrace};
pub use picker::{FixedPicker, MessagePicker, SeededPicker, ThreadRngPicker};
pub use rank::{accepted, rank};
pub use response::{
    BLANK_QUERY_MESSAGE, ChatResponse, FALLBACK_MESSAGES, ResponseKind, TopicSuggestion,
    compose,
};
pub use types::{MatchKind, MatchResult, TopicSummary};
