//! The knowledge base: topics plus the index and settings used to answer queries.

use std::{collections::HashMap, fmt};

use serde::Serialize;
use tracing::debug;
use tutor_config::MatchSettings;
use tutor_corpus::Topic;

use crate::{
    ChatResponse, CorpusIndex, IndexError, LookupError, MatchResult, MessagePicker,
    ThreadRngPicker, TopicSummary, fuzzy::fuzzy_match, keyword::keyword_match, rank::rank,
    response::compose,
};

/// Immutable, shareable context that answers queries.
///
/// Everything a query needs is built once in [`KnowledgeBase::new`]. Answering never
/// mutates the knowledge base, so one instance can serve concurrent callers.
pub struct KnowledgeBase {
    /// Topics in knowledge-base order.
    topics: Vec<Topic>,
    /// Topic id to position in `topics`.
    positions: HashMap<String, usize>,
    /// Flattened question index.
    index: CorpusIndex,
    /// Thresholds and limits.
    settings: MatchSettings,
    /// Source of fallback message choices.
    picker: Box<dyn MessagePicker>,
}

impl fmt::Debug for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnowledgeBase")
            .field("topics", &self.topics.len())
            .field("entries", &self.index.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Step-by-step record of how a query was answered.
#[derive(Debug, Clone, Serialize)]
pub struct MatchTrace<'a> {
    /// Query as received.
    pub query: String,
    /// Topic scope, if any.
    pub scope: Option<String>,
    /// Whether the query was rejected as blank.
    pub blank: bool,
    /// Exact and keyword hits, in corpus order.
    pub keyword_hits: Vec<MatchResult<'a>>,
    /// Whether the fuzzy matcher ran.
    pub fuzzy_ran: bool,
    /// Fuzzy hits, best first.
    pub fuzzy_hits: Vec<MatchResult<'a>>,
    /// Deduplicated results, best first.
    pub ranked: Vec<MatchResult<'a>>,
    /// Acceptance threshold in effect.
    pub acceptance_threshold: f32,
    /// The reply.
    pub response: ChatResponse,
}

impl KnowledgeBase {
    /// Indexes `topics` and prepares a knowledge base that picks fallback messages at random.
    pub fn new(topics: Vec<Topic>, settings: MatchSettings) -> Result<Self, IndexError> {
        let index = CorpusIndex::build(&topics, &settings)?;
        let positions = topics
            .iter()
            .enumerate()
            .map(|(position, topic)| (topic.id.clone(), position))
            .collect();

        Ok(Self {
            topics,
            positions,
            index,
            settings,
            picker: Box::new(ThreadRngPicker),
        })
    }

    /// Replaces the fallback message picker.
    #[must_use]
    pub fn with_picker(mut self, picker: impl MessagePicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Answers `query`, optionally restricting exact and keyword matching to one topic.
    pub fn respond(&self, query: &str, scope: Option<&str>) -> ChatResponse {
        self.explain(query, scope).response
    }

    /// Answers `query` and records every intermediate stage.
    ///
    /// Blank queries are rejected before any matching. The fuzzy matcher runs over the
    /// whole corpus, and only when exact and keyword matching found nothing.
    pub fn explain(&self, query: &str, scope: Option<&str>) -> MatchTrace<'_> {
        let mut trace = MatchTrace {
            query: query.to_string(),
            scope: scope.map(str::to_string),
            blank: query.trim().is_empty(),
            keyword_hits: Vec::new(),
            fuzzy_ran: false,
            fuzzy_hits: Vec::new(),
            ranked: Vec::new(),
            acceptance_threshold: self.settings.acceptance_threshold,
            response: ChatResponse::blank_query(),
        };

        if trace.blank {
            debug!("blank query");
            return trace;
        }

        trace.keyword_hits = keyword_match(&self.index, query, scope);
        if trace.keyword_hits.is_empty() {
            trace.fuzzy_ran = true;
            trace.fuzzy_hits = fuzzy_match(&self.index, query, self.settings.fuzzy_limit);
        }

        let candidates = trace
            .keyword_hits
            .iter()
            .chain(&trace.fuzzy_hits)
            .copied()
            .collect();
        trace.ranked = rank(candidates);

        trace.response = compose(
            &trace.ranked,
            self.settings.acceptance_threshold,
            &self.topics,
            self.settings.suggestion_limit,
            self.picker.as_ref(),
        );

        debug!(
            keyword_hits = trace.keyword_hits.len(),
            fuzzy_hits = trace.fuzzy_hits.len(),
            kind = ?trace.response.kind,
            confidence = trace.response.confidence,
            "query answered"
        );

        trace
    }

    /// Every topic in knowledge-base order.
    pub fn list_topics(&self) -> Vec<TopicSummary> {
        self.topics
            .iter()
            .map(|topic| TopicSummary {
                id: topic.id.clone(),
                title: topic.title.clone(),
                description: topic.description.clone(),
                question_count: topic.questions.len(),
            })
            .collect()
    }

    /// Looks up a topic by id.
    pub fn topic(&self, id: &str) -> Result<&Topic, LookupError> {
        self.positions
            .get(id)
            .map(|&position| &self.topics[position])
            .ok_or_else(|| LookupError::TopicNotFound { id: id.to_string() })
    }

    /// All topics in knowledge-base order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// The flattened question index.
    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    /// Settings in effect.
    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use tutor_corpus::QuestionRecord;

    use super::*;
    use crate::{FALLBACK_MESSAGES, FixedPicker, MatchKind, ResponseKind};

    /// A knowledge base over two topics with a pinned fallback message.
    fn knowledge_base() -> KnowledgeBase {
        let topics = vec![
            Topic::new("bayes-theorem")
                .with_title("Bayes' theorem")
                .with_description("Updating beliefs with evidence")
                .with_question(QuestionRecord::new(
                    "What is Bayes' theorem?",
                    "P(A|B) = P(B|A) P(A) / P(B)",
                    ["bayes", "probability"],
                ))
                .with_question(QuestionRecord::new(
                    "What is a prior?",
                    "Belief before seeing evidence.",
                    ["prior"],
                )),
            Topic::new("production-rules")
                .with_title("Production rules")
                .with_question(QuestionRecord::new(
                    "What is a production rule?",
                    "An IF-THEN pair.",
                    ["rule"],
                )),
        ];
        KnowledgeBase::new(topics, MatchSettings::default())
            .unwrap()
            .with_picker(FixedPicker(0))
    }

    #[test]
    fn test_keyword_answer() {
        let kb = knowledge_base();

        let response = kb.respond("bayes theorem formula", None);

        assert_eq!(response.kind, ResponseKind::Answer);
        assert_eq!(response.answer, "P(A|B) = P(B|A) P(A) / P(B)");
        assert_eq!(response.topic.as_deref(), Some("bayes-theorem"));
        assert_eq!(response.confidence, Some(0.8));
    }

    #[test]
    fn test_unknown_query_falls_back() {
        let kb = knowledge_base();

        let response = kb.respond("xyzzy nonsense", None);

        assert_eq!(response.kind, ResponseKind::Fallback);
        assert_eq!(response.answer, FALLBACK_MESSAGES[0]);
        let suggestions = response.suggestions.unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1].title, "Production rules");
    }

    #[test]
    fn test_blank_query_is_error() {
        let kb = knowledge_base();

        for query in ["", "   ", "\t\n"] {
            let trace = kb.explain(query, None);
            assert!(trace.blank);
            assert_eq!(trace.response.kind, ResponseKind::Error);
            assert!(trace.keyword_hits.is_empty() && !trace.fuzzy_ran);
        }
    }

    #[test]
    fn test_fuzzy_skipped_after_keyword_hit() {
        let kb = knowledge_base();

        let trace = kb.explain("prior", None);

        assert!(!trace.fuzzy_ran);
        assert_eq!(trace.keyword_hits.len(), 1);
        assert_eq!(trace.keyword_hits[0].kind, MatchKind::Exact);
    }

    #[test]
    fn test_fuzzy_runs_on_misspelling() {
        let kb = knowledge_base();

        let trace = kb.explain("bayse theorem", None);

        assert!(trace.fuzzy_ran);
        assert!(trace.keyword_hits.is_empty());
        assert_eq!(trace.response.kind, ResponseKind::Answer);
        assert_eq!(trace.response.topic.as_deref(), Some("bayes-theorem"));
    }

    #[test]
    fn test_scope_limits_keywords_not_fuzzy() {
        let kb = knowledge_base();

        // The keyword hit lives in bayes-theorem, so the scoped keyword pass finds
        // nothing and the fuzzy pass searches everything.
        let trace = kb.explain("prior", Some("production-rules"));

        assert!(trace.keyword_hits.is_empty());
        assert!(trace.fuzzy_ran);
        assert_eq!(trace.response.topic.as_deref(), Some("bayes-theorem"));
    }

    #[test]
    fn test_confidence_is_top_score() {
        let kb = knowledge_base();

        for query in ["prior", "rule", "bayse theorem"] {
            let trace = kb.explain(query, None);
            assert_eq!(trace.response.confidence, trace.ranked.first().map(|r| r.score));
        }
    }

    #[test]
    fn test_list_and_lookup_topics() {
        let kb = knowledge_base();

        let summaries = kb.list_topics();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "bayes-theorem");
        assert_eq!(summaries[0].question_count, 2);
        assert_eq!(summaries[0].description, "Updating beliefs with evidence");

        assert_eq!(kb.topic("production-rules").unwrap().title, "Production rules");
        assert_eq!(
            kb.topic("missing").unwrap_err(),
            LookupError::TopicNotFound {
                id: "missing".into()
            }
        );
    }

    #[test]
    fn test_topic_without_questions() {
        let topics = vec![
            Topic::new("empty").with_title("Empty topic"),
            Topic::new("bayes-theorem").with_question(QuestionRecord::new(
                "What is a prior?",
                "Belief before seeing evidence.",
                ["prior"],
            )),
        ];
        let kb = KnowledgeBase::new(topics, MatchSettings::default())
            .unwrap()
            .with_picker(FixedPicker(1));

        assert_eq!(kb.index().len(), 1);
        let summaries = kb.list_topics();
        assert_eq!(summaries[0].id, "empty");
        assert_eq!(summaries[0].question_count, 0);

        let fallback = kb.respond("xyzzy", Some("empty"));
        assert_eq!(fallback.kind, ResponseKind::Fallback);
        assert_eq!(fallback.answer, FALLBACK_MESSAGES[1]);
        let ids: Vec<_> = fallback
            .suggestions
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["empty", "bayes-theorem"]);

        // Nothing to match in the scope, so the corpus-wide fuzzy pass answers.
        let trace = kb.explain("prior", Some("empty"));
        assert!(trace.keyword_hits.is_empty());
        assert!(trace.fuzzy_ran);
        assert_eq!(trace.response.answer, "Belief before seeing evidence.");
        assert_eq!(trace.response.confidence, Some(1.0));

        let unscoped = kb.respond("what is a prior", None);
        assert_eq!(unscoped.kind, ResponseKind::Answer);
        assert_eq!(unscoped.topic.as_deref(), Some("bayes-theorem"));
    }

    #[test]
    fn test_shared_between_threads() {
        let kb = Arc::new(knowledge_base());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let kb = Arc::clone(&kb);
                thread::spawn(move || kb.respond("what is a production rule", None))
            })
            .collect();

        for handle in handles {
            let response = handle.join().unwrap();
            assert_eq!(response.answer, "An IF-THEN pair.");
        }
    }
}
