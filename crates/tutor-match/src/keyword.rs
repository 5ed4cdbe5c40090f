//! Exact and keyword matching.
//!
//! Each entry is tested against an ordered rule table. The first rule that applies
//! produces the entry's only result, so an entry never yields both an exact and a keyword
//! hit for the same query.

use tracing::debug;

use crate::{CorpusEntry, CorpusIndex, MatchKind, MatchResult};

/// Score of a hit where the query appears inside the question.
pub const EXACT_SCORE: f32 = 1.0;

/// Score of a hit where the query and a keyword overlap.
pub const KEYWORD_SCORE: f32 = 0.8;

/// A rule deciding whether an entry matches a lowercased query.
struct MatchRule {
    /// Kind assigned to hits.
    kind: MatchKind,
    /// Score assigned to hits.
    score: f32,
    /// Predicate over the lowercased query and the entry.
    applies: fn(&str, &CorpusEntry) -> bool,
}

/// Rules in priority order.
const MATCH_RULES: [MatchRule; 2] = [
    MatchRule {
        kind: MatchKind::Exact,
        score: EXACT_SCORE,
        applies: question_contains_query,
    },
    MatchRule {
        kind: MatchKind::Keyword,
        score: KEYWORD_SCORE,
        applies: keyword_overlaps_query,
    },
];

/// The question contains the whole query.
fn question_contains_query(query: &str, entry: &CorpusEntry) -> bool {
    entry.question_lower.contains(query)
}

/// Some keyword contains the query, or the query contains some keyword.
fn keyword_overlaps_query(query: &str, entry: &CorpusEntry) -> bool {
    entry
        .keywords_lower
        .iter()
        .any(|keyword| keyword.contains(query) || query.contains(keyword.as_str()))
}

/// Matches `query` against entries of the scoped topic, or the whole corpus.
///
/// Comparison is case-insensitive and uses the query exactly as typed. An unknown scope
/// selects no entries. Results are in corpus order.
pub fn keyword_match<'a>(
    index: &'a CorpusIndex,
    query: &str,
    scope: Option<&str>,
) -> Vec<MatchResult<'a>> {
    let query = query.to_lowercase();

    let results: Vec<MatchResult<'a>> = index
        .entries
        .iter()
        .filter(|entry| scope.is_none_or(|topic| entry.topic == topic))
        .filter_map(|entry| {
            MATCH_RULES
                .iter()
                .find(|rule| (rule.applies)(&query, entry))
                .map(|rule| MatchResult {
                    entry,
                    score: rule.score,
                    kind: rule.kind,
                })
        })
        .collect();

    if results.is_empty()
        && let Some(topic) = scope
        && !index.entries.iter().any(|entry| entry.topic == topic)
    {
        debug!(topic, "scope selects no questions");
    }

    results
}

#[cfg(test)]
mod tests {
    use tutor_config::MatchSettings;
    use tutor_corpus::{QuestionRecord, Topic};

    use super::*;

    /// Index with two topics.
    fn index() -> CorpusIndex {
        let topics = vec![
            Topic::new("bayes-theorem").with_question(QuestionRecord::new(
                "What is Bayes' theorem?",
                "P(A|B) = P(B|A) P(A) / P(B)",
                ["bayes", "probability"],
            )),
            Topic::new("production-rules")
                .with_question(QuestionRecord::new(
                    "What is a production rule?",
                    "An IF-THEN pair.",
                    ["rule", "production"],
                ))
                .with_question(QuestionRecord::new(
                    "How is probability used in expert systems?",
                    "Through certainty factors.",
                    ["certainty"],
                )),
        ];
        CorpusIndex::build(&topics, &MatchSettings::default()).unwrap()
    }

    /// Questions and kinds of the results.
    fn summary<'a>(results: &'a [MatchResult<'_>]) -> Vec<(&'a str, MatchKind)> {
        results.iter().map(|r| (r.question(), r.kind)).collect()
    }

    #[test]
    fn test_query_contains_keyword() {
        let index = index();

        let results = keyword_match(&index, "bayes theorem formula", None);

        assert_eq!(
            summary(&results),
            vec![("What is Bayes' theorem?", MatchKind::Keyword)]
        );
        assert_eq!(results[0].score, KEYWORD_SCORE);
    }

    #[test]
    fn test_exact_takes_precedence_over_keyword() {
        let index = index();

        // Both a substring of the question and of the keyword "production".
        let results = keyword_match(&index, "Production", None);

        assert_eq!(
            summary(&results),
            vec![("What is a production rule?", MatchKind::Exact)]
        );
        assert_eq!(results[0].score, EXACT_SCORE);
    }

    #[test]
    fn test_keyword_contains_query() {
        let index = index();

        let results = keyword_match(&index, "certain", None);

        assert_eq!(
            summary(&results),
            vec![("How is probability used in expert systems?", MatchKind::Keyword)]
        );
    }

    #[test]
    fn test_results_in_corpus_order() {
        let index = index();

        let results = keyword_match(&index, "probability", None);

        assert_eq!(
            summary(&results),
            vec![
                ("What is Bayes' theorem?", MatchKind::Keyword),
                ("How is probability used in expert systems?", MatchKind::Exact),
            ]
        );
    }

    #[test]
    fn test_scope_restricts_topics() {
        let index = index();

        let results = keyword_match(&index, "probability", Some("production-rules"));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].topic(), "production-rules");
    }

    #[test]
    fn test_unknown_scope_matches_nothing() {
        let index = index();
        assert!(keyword_match(&index, "bayes", Some("no-such-topic")).is_empty());
    }

    #[test]
    fn test_query_matched_as_typed() {
        let index = index();

        // Trailing space is kept, so the question cannot contain the query.
        let results = keyword_match(&index, "bayes' theorem? ", None);
        assert_eq!(summary(&results), vec![("What is Bayes' theorem?", MatchKind::Keyword)]);
    }
}
