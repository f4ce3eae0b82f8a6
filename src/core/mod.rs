// Core algorithm exports
pub mod candidates;
pub mod keywords;
pub mod ranker;
pub mod recommender;
pub mod scoring;

pub use candidates::CandidateQuery;
pub use keywords::{normalize, normalize_list, Keyword, KeywordSet};
pub use ranker::{rank, rank_until};
pub use recommender::{RecommendError, Recommendation, Recommender};
pub use scoring::{calculate_match_score, score_candidate};
