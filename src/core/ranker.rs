use crate::core::keywords::KeywordSet;
use crate::core::scoring::score_candidate;
use crate::models::{Opportunity, ScoredCandidate};
use std::cmp::Reverse;
use std::time::Instant;

/// How many candidates are scored between deadline checks
const DEADLINE_CHECK_INTERVAL: usize = 64;

/// Rank candidates by descending score
///
/// The sort is stable: candidates with equal scores keep the order the
/// store returned them in. Scores are dropped from the result.
pub fn rank(candidates: Vec<Opportunity>, user_keywords: &KeywordSet) -> Vec<Opportunity> {
    rank_checked(candidates, user_keywords, || false).unwrap_or_default()
}

/// Rank candidates, giving up if `deadline` passes before scoring is done
///
/// Returns `None` when the deadline fires; no partial ranking is produced.
pub fn rank_until(
    candidates: Vec<Opportunity>,
    user_keywords: &KeywordSet,
    deadline: Instant,
) -> Option<Vec<Opportunity>> {
    rank_checked(candidates, user_keywords, || Instant::now() >= deadline)
}

fn rank_checked<F>(
    candidates: Vec<Opportunity>,
    user_keywords: &KeywordSet,
    mut expired: F,
) -> Option<Vec<Opportunity>>
where
    F: FnMut() -> bool,
{
    let mut scored: Vec<ScoredCandidate> = Vec::with_capacity(candidates.len());

    for (i, opportunity) in candidates.into_iter().enumerate() {
        if i % DEADLINE_CHECK_INTERVAL == 0 && expired() {
            return None;
        }
        scored.push(score_candidate(opportunity, user_keywords));
    }

    if expired() {
        return None;
    }

    // sort_by_key is stable
    scored.sort_by_key(|candidate| Reverse(candidate.score));

    Some(scored.into_iter().map(|c| c.opportunity).collect())
}
