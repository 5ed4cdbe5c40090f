//! Fuzzy matching over the corpus index.
//!
//! Queries and corpus text are split into lowercased words. Each query word is compiled
//! into a Levenshtein automaton and run against the index vocabulary, which gives the
//! smallest edit count to any corpus word within the configured edit budget.
//!
//! Distances are normalized to `[0, 1]`:
//!
//! - a query word's distance to a word is `edits / chars(query word)`, capped at 1, and
//!   1 when the word is outside the edit budget;
//! - a query word's distance to a key (the question, or the keywords) is its smallest
//!   distance to any word of that key;
//! - a key's distance is the mean over all query words;
//! - an entry's distance is the smaller of its two key distances.
//!
//! Entries at or under the fuzzy threshold become candidates, scored `1 - distance`.

use levenshtein_automata::{DFA, Distance, SINK_STATE};
use tracing::trace;

use crate::{CorpusEntry, CorpusIndex, MatchKind, MatchResult};

/// Distance of a word that is entirely unlike the query.
const MAX_DISTANCE: f32 = 1.0;

/// Wrapper that runs a `levenshtein_automata::DFA` over whole words.
struct LevenshteinDfa(DFA);

impl LevenshteinDfa {
    /// Returns the edit distance to `word`, or `None` when it exceeds the automaton budget.
    fn edits(&self, word: &str) -> Option<u8> {
        let mut state = self.0.initial_state();
        for &byte in word.as_bytes() {
            state = self.0.transition(state, byte);
            if state == SINK_STATE {
                return None;
            }
        }
        match self.0.distance(state) {
            Distance::Exact(edits) => Some(edits),
            Distance::AtLeast(_) => None,
        }
    }
}

/// A fuzzy candidate before conversion to a [`MatchResult`].
#[derive(Debug, Clone, Copy)]
pub struct FuzzyCandidate<'a> {
    /// The matched entry.
    pub entry: &'a CorpusEntry,
    /// Normalized distance in `[0, 1]`; lower is closer.
    pub distance: f32,
}

impl CorpusIndex {
    /// Scores every entry against `query` and returns those within the fuzzy threshold.
    ///
    /// Candidates are sorted by ascending distance. Ties keep corpus order. A query with
    /// no words yields no candidates.
    pub fn search(&self, query: &str) -> Vec<FuzzyCandidate<'_>> {
        let words = query_words(query);
        if words.is_empty() || self.entries.is_empty() {
            return Vec::new();
        }

        let word_distances: Vec<Vec<f32>> =
            words.iter().map(|w| self.vocabulary_distances(w)).collect();

        let mut candidates: Vec<FuzzyCandidate<'_>> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let distance = key_distance(&entry.question_terms, &word_distances)
                    .min(key_distance(&entry.keyword_terms, &word_distances));
                trace!(question = %entry.question, distance, "fuzzy distance");
                (distance <= self.fuzzy_threshold).then_some(FuzzyCandidate { entry, distance })
            })
            .collect();

        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        candidates
    }

    /// Normalized distance from `word` to every vocabulary entry, indexed by term id.
    fn vocabulary_distances(&self, word: &str) -> Vec<f32> {
        let dfa = LevenshteinDfa(self.lev_builder.build_dfa(word));
        let len = word.chars().count() as f32;

        self.vocabulary
            .iter()
            .map(|term| {
                dfa.edits(term)
                    .map_or(MAX_DISTANCE, |edits| (f32::from(edits) / len).min(MAX_DISTANCE))
            })
            .collect()
    }
}

/// Returns at most `limit` fuzzy results for `query`, best first.
///
/// The fuzzy matcher always searches the whole corpus.
pub fn fuzzy_match<'a>(index: &'a CorpusIndex, query: &str, limit: usize) -> Vec<MatchResult<'a>> {
    index
        .search(query)
        .into_iter()
        .take(limit)
        .map(|candidate| MatchResult {
            entry: candidate.entry,
            score: 1.0 - candidate.distance,
            kind: MatchKind::Fuzzy,
        })
        .collect()
}

/// Splits text into lowercased words on any non-alphanumeric character.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Tokenizes a query, dropping repeated words.
fn query_words(query: &str) -> Vec<String> {
    let mut words = tokenize(query);
    let mut seen = Vec::with_capacity(words.len());
    words.retain(|w| {
        if seen.contains(w) {
            false
        } else {
            seen.push(w.clone());
            true
        }
    });
    words
}

/// Mean over query words of the closest distance to any term of the key.
///
/// An empty key is maximally distant.
fn key_distance(key_terms: &[usize], word_distances: &[Vec<f32>]) -> f32 {
    if key_terms.is_empty() || word_distances.is_empty() {
        return MAX_DISTANCE;
    }

    let total: f32 = word_distances
        .iter()
        .map(|distances| {
            key_terms
                .iter()
                .map(|&term| distances[term])
                .fold(MAX_DISTANCE, f32::min)
        })
        .sum();

    total / word_distances.len() as f32
}
