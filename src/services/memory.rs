use crate::core::{normalize_list, CandidateQuery};
use crate::models::{NewOpportunity, Opportunity, OpportunityPatch, UserProfile};
use crate::services::store::{OpportunityStore, StoreError, UserStore};
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Process-local store
///
/// Keeps records in insertion order, which is the order candidates are
/// returned in. Backs the `memory` storage backend and the test suite.
#[derive(Default)]
pub struct InMemoryStore {
    opportunities: RwLock<Vec<Opportunity>>,
    users: RwLock<Vec<UserProfile>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records; opportunity lists are normalized on the way in
    pub fn with_records(opportunities: Vec<Opportunity>, users: Vec<UserProfile>) -> Self {
        Self {
            opportunities: RwLock::new(opportunities.into_iter().map(normalized).collect()),
            users: RwLock::new(users),
        }
    }

    /// Add or replace a user profile
    pub fn upsert_user(&self, profile: UserProfile) -> Result<(), StoreError> {
        let mut users = write(&self.users)?;
        match users.iter_mut().find(|u| u.id == profile.id) {
            Some(existing) => *existing = profile,
            None => users.push(profile),
        }
        Ok(())
    }

    /// Append an existing opportunity, normalizing its skill and tag lists
    pub fn insert_opportunity(&self, opportunity: Opportunity) -> Result<(), StoreError> {
        write(&self.opportunities)?.push(normalized(opportunity));
        Ok(())
    }
}

fn normalized(mut opportunity: Opportunity) -> Opportunity {
    opportunity.required_skills = normalize_list(&opportunity.required_skills);
    opportunity.tags = normalize_list(&opportunity.tags);
    opportunity
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read()
        .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write()
        .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
}

#[async_trait]
impl OpportunityStore for InMemoryStore {
    async fn find_candidates(&self, query: &CandidateQuery) -> Result<Vec<Opportunity>, StoreError> {
        let opportunities = read(&self.opportunities)?;
        Ok(opportunities
            .iter()
            .filter(|o| query.matches(o))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Opportunity>, StoreError> {
        let mut all = read(&self.opportunities)?.clone();
        // newest first; stable for equal timestamps
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Opportunity>, StoreError> {
        Ok(read(&self.opportunities)?.iter().find(|o| o.id == id).cloned())
    }

    async fn create(&self, new: NewOpportunity) -> Result<Opportunity, StoreError> {
        let opportunity = Opportunity {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            company: new.company,
            required_skills: new.required_skills,
            tags: new.tags,
            level: new.level,
            kind: new.kind,
            salary: new.salary,
            created_by: new.created_by,
            created_at: chrono::Utc::now(),
        };
        write(&self.opportunities)?.push(opportunity.clone());
        Ok(opportunity)
    }

    async fn update(&self, id: Uuid, patch: OpportunityPatch) -> Result<Option<Opportunity>, StoreError> {
        let mut opportunities = write(&self.opportunities)?;
        Ok(opportunities.iter_mut().find(|o| o.id == id).map(|o| {
            patch.apply(o);
            o.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut opportunities = write(&self.opportunities)?;
        let before = opportunities.len();
        opportunities.retain(|o| o.id != id);
        Ok(opportunities.len() < before)
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn get_profile(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        Ok(read(&self.users)?.iter().find(|u| u.id == id).cloned())
    }
}
