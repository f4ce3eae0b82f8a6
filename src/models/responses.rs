use serde::{Deserialize, Serialize};
use crate::models::domain::Opportunity;

/// Message returned alongside an empty recommendation list when the
/// profile has no skills or interests
pub const PROFILE_INCOMPLETE_MESSAGE: &str =
    "No keywords found in your profile. Please update your skills and interests for personalized recommendations.";

/// Response for the recommended opportunities endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedResponse {
    pub status: String,
    pub results: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: RecommendedData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedData {
    #[serde(rename = "recommendedOpportunities")]
    pub recommended_opportunities: Vec<Opportunity>,
}

impl RecommendedResponse {
    pub fn ranked(opportunities: Vec<Opportunity>) -> Self {
        Self {
            status: "success".to_string(),
            results: opportunities.len(),
            message: None,
            data: RecommendedData {
                recommended_opportunities: opportunities,
            },
        }
    }

    pub fn profile_incomplete() -> Self {
        Self {
            status: "success".to_string(),
            results: 0,
            message: Some(PROFILE_INCOMPLETE_MESSAGE.to_string()),
            data: RecommendedData {
                recommended_opportunities: Vec::new(),
            },
        }
    }
}

/// Response listing the catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityListResponse {
    pub status: String,
    pub results: usize,
    pub data: OpportunityListData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityListData {
    pub opportunities: Vec<Opportunity>,
}

impl OpportunityListResponse {
    pub fn new(opportunities: Vec<Opportunity>) -> Self {
        Self {
            status: "success".to_string(),
            results: opportunities.len(),
            data: OpportunityListData { opportunities },
        }
    }
}

/// Response carrying a single opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityResponse {
    pub status: String,
    pub data: OpportunityData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityData {
    pub opportunity: Opportunity,
}

impl OpportunityResponse {
    pub fn new(opportunity: Opportunity) -> Self {
        Self {
            status: "success".to_string(),
            data: OpportunityData { opportunity },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
