use crate::core::keywords::{deserialize_lenient_strings, normalize, KeywordSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// The part of a user account the recommender reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, deserialize_with = "deserialize_lenient_strings")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_strings")]
    pub interests: Vec<String>,
}

impl UserProfile {
    /// Skills and interests combined into one keyword set
    pub fn keywords(&self) -> KeywordSet {
        normalize(self.skills.iter().chain(self.interests.iter()))
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

/// Seniority of an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityLevel {
    #[default]
    Junior,
    Mid,
    Senior,
    Internship,
}

impl OpportunityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityLevel::Junior => "junior",
            OpportunityLevel::Mid => "mid",
            OpportunityLevel::Senior => "senior",
            OpportunityLevel::Internship => "internship",
        }
    }
}

impl FromStr for OpportunityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(OpportunityLevel::Junior),
            "mid" => Ok(OpportunityLevel::Mid),
            "senior" => Ok(OpportunityLevel::Senior),
            "internship" => Ok(OpportunityLevel::Internship),
            other => Err(format!("unknown opportunity level: {}", other)),
        }
    }
}

/// Engagement type of an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpportunityType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Remote,
}

impl OpportunityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityType::FullTime => "full-time",
            OpportunityType::PartTime => "part-time",
            OpportunityType::Contract => "contract",
            OpportunityType::Remote => "remote",
        }
    }
}

impl FromStr for OpportunityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(OpportunityType::FullTime),
            "part-time" => Ok(OpportunityType::PartTime),
            "contract" => Ok(OpportunityType::Contract),
            "remote" => Ok(OpportunityType::Remote),
            other => Err(format!("unknown opportunity type: {}", other)),
        }
    }
}

/// A posted job, course or tool listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    #[serde(rename = "requiredSkills", default, deserialize_with = "deserialize_lenient_strings")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_strings")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub level: OpportunityLevel,
    #[serde(rename = "type", default)]
    pub kind: OpportunityType,
    #[serde(default)]
    pub salary: f64,
    #[serde(rename = "createdBy")]
    pub created_by: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Opportunity {
    /// Required skills and tags combined into one keyword set
    ///
    /// The two lists are concatenated before normalizing so a keyword that
    /// appears in both counts once.
    pub fn keywords(&self) -> KeywordSet {
        normalize(self.required_skills.iter().chain(self.tags.iter()))
    }
}

/// Fields needed to create an opportunity
#[derive(Debug, Clone)]
pub struct NewOpportunity {
    pub title: String,
    pub description: String,
    pub company: String,
    pub required_skills: Vec<String>,
    pub tags: Vec<String>,
    pub level: OpportunityLevel,
    pub kind: OpportunityType,
    pub salary: f64,
    pub created_by: Uuid,
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct OpportunityPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub company: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub level: Option<OpportunityLevel>,
    pub kind: Option<OpportunityType>,
    pub salary: Option<f64>,
}

impl OpportunityPatch {
    /// Apply the patch to an in-memory record
    pub fn apply(self, opportunity: &mut Opportunity) {
        if let Some(title) = self.title {
            opportunity.title = title;
        }
        if let Some(description) = self.description {
            opportunity.description = description;
        }
        if let Some(company) = self.company {
            opportunity.company = company;
        }
        if let Some(required_skills) = self.required_skills {
            opportunity.required_skills = required_skills;
        }
        if let Some(tags) = self.tags {
            opportunity.tags = tags;
        }
        if let Some(level) = self.level {
            opportunity.level = level;
        }
        if let Some(kind) = self.kind {
            opportunity.kind = kind;
        }
        if let Some(salary) = self.salary {
            opportunity.salary = salary;
        }
    }
}

/// Opportunity paired with its match score; lives for one request only
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub opportunity: Opportunity,
    pub score: usize,
}
