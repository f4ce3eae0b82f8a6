//! SkillMatch - opportunity recommendation service
//!
//! Ranks job, course and tool opportunities for a user by counting the
//! distinct keywords shared between the user's skills/interests and each
//! opportunity's required skills/tags. The keyword normalizer, scorer and
//! ranker are pure; storage is injected through [`services::OpportunityStore`].

pub mod auth;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize, rank, CandidateQuery, KeywordSet, Recommendation, Recommender};
pub use models::{Opportunity, UserProfile};
