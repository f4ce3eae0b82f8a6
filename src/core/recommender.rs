use crate::core::candidates::CandidateQuery;
use crate::core::ranker::rank_until;
use crate::models::{Opportunity, UserProfile};
use crate::services::{OpportunityStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Default budget for one recommendation request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors surfaced by the recommender
///
/// An incomplete profile is not an error; see [`Recommendation::ProfileIncomplete`].
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Recommendation timed out after {0:?}")]
    TimedOut(Duration),
}

/// Outcome of a recommendation request
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// The profile has no skills or interests; nothing was fetched
    ProfileIncomplete,
    /// Opportunities ordered by descending match score
    Ranked(Vec<Opportunity>),
}

impl Recommendation {
    pub fn opportunities(&self) -> &[Opportunity] {
        match self {
            Recommendation::ProfileIncomplete => &[],
            Recommendation::Ranked(opportunities) => opportunities,
        }
    }

    pub fn len(&self) -> usize {
        self.opportunities().len()
    }

    pub fn is_empty(&self) -> bool {
        self.opportunities().is_empty()
    }

    pub fn is_profile_incomplete(&self) -> bool {
        matches!(self, Recommendation::ProfileIncomplete)
    }
}

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Normalize the user's skills and interests into a keyword set
/// 2. Short-circuit on an empty set (no fetch)
/// 3. Fetch candidates sharing at least one keyword
/// 4. Score and stably rank them
///
/// Holds no per-request state; one instance serves all requests.
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn OpportunityStore>,
    timeout: Duration,
}

impl Recommender {
    pub fn new(store: Arc<dyn OpportunityStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn with_default_timeout(store: Arc<dyn OpportunityStore>) -> Self {
        Self::new(store, DEFAULT_TIMEOUT)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Recommend opportunities for a user within the configured timeout
    pub async fn recommend(&self, user: &UserProfile) -> Result<Recommendation, RecommendError> {
        self.recommend_until(user, Instant::now() + self.timeout).await
    }

    /// Recommend opportunities for a user, abandoning the request at `deadline`
    ///
    /// The deadline bounds both the storage call and the scoring pass.
    pub async fn recommend_until(
        &self,
        user: &UserProfile,
        deadline: Instant,
    ) -> Result<Recommendation, RecommendError> {
        let keywords = user.keywords();

        let query = match CandidateQuery::new(keywords) {
            Some(query) => query,
            None => {
                tracing::debug!("User {} has no profile keywords", user.id);
                return Ok(Recommendation::ProfileIncomplete);
            }
        };

        let candidates = tokio::time::timeout_at(deadline, self.store.find_candidates(&query))
            .await
            .map_err(|_| RecommendError::TimedOut(self.timeout))??;

        tracing::debug!(
            "Scoring {} candidates for user {} ({} keywords)",
            candidates.len(),
            user.id,
            query.keywords().len()
        );

        rank_until(candidates, query.keywords(), deadline.into_std())
            .map(Recommendation::Ranked)
            .ok_or(RecommendError::TimedOut(self.timeout))
    }
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
