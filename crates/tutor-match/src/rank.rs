//! Result ranking and the acceptance decision.

use std::collections::HashSet;

use crate::MatchResult;

/// Deduplicates and orders candidates from every matcher.
///
/// Only the first result for each question text survives, so earlier matchers win over
/// later ones. The survivors are stable-sorted by descending score: equal scores keep
/// their input order.
pub fn rank(results: Vec<MatchResult<'_>>) -> Vec<MatchResult<'_>> {
    let mut seen = HashSet::new();
    let mut ranked: Vec<MatchResult<'_>> = results
        .into_iter()
        .filter(|result| seen.insert(result.entry.question.as_str()))
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Returns the top result when its score is strictly above `threshold`.
pub fn accepted<'r, 'a>(ranked: &'r [MatchResult<'a>], threshold: f32) -> Option<&'r MatchResult<'a>> {
    ranked.first().filter(|top| top.score > threshold)
}
