use crate::core::CandidateQuery;
use crate::models::{NewOpportunity, Opportunity, OpportunityPatch, UserProfile};
use crate::services::store::{OpportunityStore, StoreError, UserStore};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

const OPPORTUNITY_COLUMNS: &str = r#"
    id, title, description, company, required_skills, tags,
    level, "type", salary, created_by, created_at
"#;

/// PostgreSQL-backed store for users and opportunities
///
/// Skill and tag lists live in `TEXT[]` columns holding normalized
/// keywords, so candidate selection is a plain array-overlap test that
/// the GIN indexes can serve.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn opportunity_from_row(row: &PgRow) -> Result<Opportunity, StoreError> {
    let level: String = row.try_get("level")?;
    let kind: String = row.try_get("type")?;

    Ok(Opportunity {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        company: row.try_get("company")?,
        required_skills: row.try_get("required_skills")?,
        tags: row.try_get("tags")?,
        level: level.parse().map_err(StoreError::InvalidRecord)?,
        kind: kind.parse().map_err(StoreError::InvalidRecord)?,
        salary: row.try_get("salary")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
    })
}

fn profile_from_row(row: &PgRow) -> Result<UserProfile, StoreError> {
    let role: String = row.try_get("role")?;

    Ok(UserProfile {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        role: role.parse().map_err(StoreError::InvalidRecord)?,
        skills: row.try_get("skills")?,
        interests: row.try_get("interests")?,
    })
}

#[async_trait]
impl OpportunityStore for PostgresClient {
    async fn find_candidates(&self, query: &CandidateQuery) -> Result<Vec<Opportunity>, StoreError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM opportunities
            WHERE required_skills && $1::TEXT[] OR tags && $1::TEXT[]
            ORDER BY created_at ASC, id ASC
            "#,
            OPPORTUNITY_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(query.bind_keywords())
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            "Candidate query with {} keywords matched {} opportunities",
            query.keywords().len(),
            rows.len()
        );

        rows.iter().map(opportunity_from_row).collect()
    }

    async fn list(&self) -> Result<Vec<Opportunity>, StoreError> {
        let sql = format!(
            "SELECT {} FROM opportunities ORDER BY created_at DESC",
            OPPORTUNITY_COLUMNS
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(opportunity_from_row).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Opportunity>, StoreError> {
        let sql = format!("SELECT {} FROM opportunities WHERE id = $1", OPPORTUNITY_COLUMNS);

        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(opportunity_from_row).transpose()
    }

    async fn create(&self, new: NewOpportunity) -> Result<Opportunity, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO opportunities
                (id, title, description, company, required_skills, tags,
                 level, "type", salary, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
            RETURNING {}
            "#,
            OPPORTUNITY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.title)
            .bind(&new.description)
            .bind(&new.company)
            .bind(&new.required_skills)
            .bind(&new.tags)
            .bind(new.level.as_str())
            .bind(new.kind.as_str())
            .bind(new.salary)
            .bind(new.created_by)
            .fetch_one(&self.pool)
            .await?;

        let opportunity = opportunity_from_row(&row)?;
        tracing::debug!("Created opportunity {} ({})", opportunity.id, opportunity.title);
        Ok(opportunity)
    }

    async fn update(&self, id: Uuid, patch: OpportunityPatch) -> Result<Option<Opportunity>, StoreError> {
        let sql = format!(
            r#"
            UPDATE opportunities SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                company = COALESCE($4, company),
                required_skills = COALESCE($5, required_skills),
                tags = COALESCE($6, tags),
                level = COALESCE($7, level),
                "type" = COALESCE($8, "type"),
                salary = COALESCE($9, salary)
            WHERE id = $1
            RETURNING {}
            "#,
            OPPORTUNITY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.company)
            .bind(patch.required_skills)
            .bind(patch.tags)
            .bind(patch.level.map(|l| l.as_str()))
            .bind(patch.kind.map(|k| k.as_str()))
            .bind(patch.salary)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(opportunity_from_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM opportunities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl UserStore for PostgresClient {
    async fn get_profile(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, role, skills, interests
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(profile_from_row).transpose()
    }
}
