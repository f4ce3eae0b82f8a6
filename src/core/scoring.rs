use crate::core::keywords::KeywordSet;
use crate::models::{Opportunity, ScoredCandidate};

/// Calculate the match score of an opportunity for a user
///
/// The score is the number of distinct keywords shared between the user's
/// keyword set and the opportunity's combined required skills and tags.
/// A match in `required_skills` weighs the same as a match in `tags`.
/// An opportunity with no overlap scores 0.
#[inline]
pub fn calculate_match_score(opportunity: &Opportunity, user_keywords: &KeywordSet) -> usize {
    opportunity.keywords().intersection_count(user_keywords)
}

/// Pair an opportunity with its score
pub fn score_candidate(opportunity: Opportunity, user_keywords: &KeywordSet) -> ScoredCandidate {
    let score = calculate_match_score(&opportunity, user_keywords);
    ScoredCandidate { opportunity, score }
}
