//! The flattened corpus index.
//!
//! Every question of every topic becomes one [`CorpusEntry`], in topic order and then in
//! question order within each topic. The index also tokenizes each entry's question and
//! keywords into a shared vocabulary so the fuzzy matcher can score a query term against
//! each distinct word once.

use std::collections::{BTreeMap, HashSet};

use levenshtein_automata::LevenshteinAutomatonBuilder;
use serde::Serialize;
use tracing::{debug, warn};
use tutor_config::{MAX_FUZZY_DISTANCE, MatchSettings};
use tutor_corpus::Topic;

use crate::{IndexError, fuzzy::tokenize};

/// One question flattened out of its topic.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusEntry {
    /// Question text. Identifies the entry during ranking.
    pub question: String,
    /// Answer text.
    pub answer: String,
    /// Owning topic id.
    pub topic: String,
    /// Keyword tags.
    pub keywords: Vec<String>,
    /// Lowercased question for substring tests.
    #[serde(skip)]
    pub(crate) question_lower: String,
    /// Lowercased keywords for substring tests.
    #[serde(skip)]
    pub(crate) keywords_lower: Vec<String>,
    /// Vocabulary ids of the question's words.
    #[serde(skip)]
    pub(crate) question_terms: Vec<usize>,
    /// Vocabulary ids of the words of all keywords.
    #[serde(skip)]
    pub(crate) keyword_terms: Vec<usize>,
}

/// Flattened, searchable view over every question in the knowledge base.
///
/// Built once and never mutated, so it can be shared freely between threads.
pub struct CorpusIndex {
    /// Entries in corpus order.
    pub(crate) entries: Vec<CorpusEntry>,
    /// Distinct lowercased words across all questions and keywords.
    pub(crate) vocabulary: Vec<String>,
    /// Builder for per-term Levenshtein automatons.
    pub(crate) lev_builder: LevenshteinAutomatonBuilder,
    /// Maximum edits per query term.
    pub(crate) fuzzy_distance: u8,
    /// Maximum mean normalized distance a fuzzy candidate may have.
    pub(crate) fuzzy_threshold: f32,
    /// Question texts that repeat an earlier entry's text.
    duplicates: Vec<String>,
}

impl CorpusIndex {
    /// Flattens `topics` into an index.
    ///
    /// Topic ids must be unique and every question must have non-blank text. A question
    /// whose exact text already appeared earlier in the corpus is kept but reported with a
    /// warning: ranking identifies results by question text, so the later copy can only
    /// win when the earlier one is out of scope.
    pub fn build(topics: &[Topic], settings: &MatchSettings) -> Result<Self, IndexError> {
        check_settings(settings)?;

        let mut seen_topics = HashSet::new();
        let mut seen_questions = HashSet::new();
        let mut vocabulary = Vocabulary::default();
        let mut entries = Vec::new();
        let mut duplicates = Vec::new();

        for topic in topics {
            if !seen_topics.insert(topic.id.as_str()) {
                return Err(IndexError::DuplicateTopic {
                    id: topic.id.clone(),
                });
            }

            for (position, record) in topic.questions.iter().enumerate() {
                if record.question.trim().is_empty() {
                    return Err(IndexError::BlankQuestion {
                        topic: topic.id.clone(),
                        position: position + 1,
                    });
                }

                if !seen_questions.insert(record.question.as_str()) {
                    warn!(
                        topic = %topic.id,
                        question = %record.question,
                        "duplicate question text, only the first occurrence can win ranking"
                    );
                    duplicates.push(record.question.clone());
                }

                let question_terms = vocabulary.intern_all(&tokenize(&record.question));
                let keyword_words: Vec<String> =
                    record.keywords.iter().flat_map(|k| tokenize(k)).collect();
                let keyword_terms = vocabulary.intern_all(&keyword_words);

                entries.push(CorpusEntry {
                    question: record.question.clone(),
                    answer: record.answer.clone(),
                    topic: topic.id.clone(),
                    keywords: record.keywords.clone(),
                    question_lower: record.question.to_lowercase(),
                    keywords_lower: record.keywords.iter().map(|k| k.to_lowercase()).collect(),
                    question_terms,
                    keyword_terms,
                });
            }
        }

        let vocabulary = vocabulary.into_terms();
        debug!(
            entries = entries.len(),
            vocabulary = vocabulary.len(),
            duplicates = duplicates.len(),
            "corpus index built"
        );

        Ok(Self {
            entries,
            vocabulary,
            lev_builder: LevenshteinAutomatonBuilder::new(settings.fuzzy_distance, true),
            fuzzy_distance: settings.fuzzy_distance,
            fuzzy_threshold: settings.fuzzy_threshold,
            duplicates,
        })
    }

    /// All entries in corpus order.
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the corpus holds no questions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct words known to the fuzzy matcher.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Question texts that appeared more than once, in corpus order of the repeats.
    pub fn duplicate_questions(&self) -> &[String] {
        &self.duplicates
    }
}

/// Rejects settings the index cannot honor.
fn check_settings(settings: &MatchSettings) -> Result<(), IndexError> {
    if settings.fuzzy_distance > MAX_FUZZY_DISTANCE {
        return Err(IndexError::FuzzyDistanceTooLarge {
            value: settings.fuzzy_distance,
            max: MAX_FUZZY_DISTANCE,
        });
    }

    for (setting, value) in [
        ("acceptance_threshold", settings.acceptance_threshold),
        ("fuzzy_threshold", settings.fuzzy_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(IndexError::ThresholdOutOfRange { setting, value });
        }
    }

    Ok(())
}

/// Assigns stable ids to distinct words.
#[derive(Default)]
struct Vocabulary {
    /// Word to id.
    ids: BTreeMap<String, usize>,
}

impl Vocabulary {
    /// Returns the ids of `words`, registering new ones. Repeated words map to one id.
    fn intern_all(&mut self, words: &[String]) -> Vec<usize> {
        let mut ids = Vec::with_capacity(words.len());
        for word in words {
            let next = self.ids.len();
            let id = *self.ids.entry(word.clone()).or_insert(next);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Consumes the vocabulary, returning words indexed by id.
    fn into_terms(self) -> Vec<String> {
        let mut terms = vec![String::new(); self.ids.len()];
        for (word, id) in self.ids {
            terms[id] = word;
        }
        terms
    }
}
