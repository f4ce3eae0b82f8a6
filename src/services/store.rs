use crate::core::CandidateQuery;
use crate::models::{NewOpportunity, Opportunity, OpportunityPatch, UserProfile};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when talking to the backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Read and write access to opportunities
#[async_trait]
pub trait OpportunityStore: Send + Sync {
    /// Opportunities whose required skills or tags intersect the query's
    /// keywords, each at most once, in storage order
    async fn find_candidates(&self, query: &CandidateQuery) -> Result<Vec<Opportunity>, StoreError>;

    /// All opportunities, newest first
    async fn list(&self) -> Result<Vec<Opportunity>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Opportunity>, StoreError>;

    async fn create(&self, opportunity: NewOpportunity) -> Result<Opportunity, StoreError>;

    /// Returns `None` when no opportunity has that id
    async fn update(&self, id: Uuid, patch: OpportunityPatch) -> Result<Option<Opportunity>, StoreError>;

    /// Returns `false` when no opportunity has that id
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Read access to user profiles
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_profile(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError>;
}
