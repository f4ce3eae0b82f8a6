use crate::core::keywords::{deserialize_lenient_strings, normalize, normalize_list};
use crate::models::domain::{NewOpportunity, OpportunityLevel, OpportunityPatch, OpportunityType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Request to create an opportunity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOpportunityRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(custom(function = "validate_description"))]
    pub description: String,
    #[validate(custom(function = "validate_company"))]
    pub company: String,
    #[validate(custom(function = "validate_required_skills"))]
    #[serde(rename = "requiredSkills", default, deserialize_with = "deserialize_lenient_strings")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_strings")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub level: OpportunityLevel,
    #[serde(rename = "type", default)]
    pub kind: OpportunityType,
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    #[serde(default)]
    pub salary: f64,
}

impl CreateOpportunityRequest {
    /// Build the record to store, with skill and tag lists normalized
    pub fn into_new(self, created_by: Uuid) -> NewOpportunity {
        NewOpportunity {
            title: self.title.trim().to_string(),
            description: self.description,
            company: self.company.trim().to_string(),
            required_skills: normalize_list(&self.required_skills),
            tags: normalize_list(&self.tags),
            level: self.level,
            kind: self.kind,
            salary: self.salary,
            created_by,
        }
    }
}

/// Request to update an opportunity; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateOpportunityRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_description"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_company"))]
    pub company: Option<String>,
    #[validate(custom(function = "validate_required_skill_values"))]
    #[serde(rename = "requiredSkills")]
    pub required_skills: Option<Vec<serde_json::Value>>,
    pub tags: Option<Vec<serde_json::Value>>,
    pub level: Option<OpportunityLevel>,
    #[serde(rename = "type")]
    pub kind: Option<OpportunityType>,
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary: Option<f64>,
}

impl UpdateOpportunityRequest {
    /// Build the patch to apply, with skill and tag lists normalized
    pub fn into_patch(self) -> OpportunityPatch {
        OpportunityPatch {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description,
            company: self.company.map(|c| c.trim().to_string()),
            required_skills: self.required_skills.map(|values| normalize_values(&values)),
            tags: self.tags.map(|values| normalize_values(&values)),
            level: self.level,
            kind: self.kind,
            salary: self.salary,
        }
    }
}

fn normalize_values(values: &[serde_json::Value]) -> Vec<String> {
    normalize_list(values.iter().filter_map(|v| v.as_str()))
}

// Checks run on the trimmed/normalized value that ends up stored.

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.trim().chars().count();
    if (1..=100).contains(&len) {
        Ok(())
    } else {
        Err(invalid("length", "Title must be between 1 and 100 characters"))
    }
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(invalid("required", "Opportunity must have a description"));
    }
    Ok(())
}

fn validate_company(company: &str) -> Result<(), ValidationError> {
    if company.trim().is_empty() {
        return Err(invalid("required", "Opportunity must be linked to a company"));
    }
    Ok(())
}

fn validate_required_skills(skills: &[String]) -> Result<(), ValidationError> {
    if normalize(skills).is_empty() {
        return Err(invalid("required", "Opportunity must list required skills"));
    }
    Ok(())
}

fn validate_required_skill_values(skills: &[serde_json::Value]) -> Result<(), ValidationError> {
    if normalize_values(skills).is_empty() {
        return Err(invalid("required", "Opportunity must list required skills"));
    }
    Ok(())
}
