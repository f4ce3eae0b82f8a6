// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    NewOpportunity, Opportunity, OpportunityLevel, OpportunityPatch, OpportunityType, Role,
    ScoredCandidate, UserProfile,
};
pub use requests::{CreateOpportunityRequest, UpdateOpportunityRequest};
pub use responses::{
    ErrorResponse, HealthResponse, OpportunityListResponse, OpportunityResponse,
    RecommendedResponse, PROFILE_INCOMPLETE_MESSAGE,
};
