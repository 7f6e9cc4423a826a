use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use crate::models::{Level, Match, MatchProfile, MatchStatus, Preferences};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid stored value: {0}")]
    InvalidData(String),
}

/// PostgreSQL-backed store for match profiles and match records
///
/// The recommendation core never talks to the database; handlers load a
/// snapshot through this client and hand it over.
pub struct PostgresClient {
    pool: PgPool,
}

const PROFILE_COLUMNS: &str = r#"
    user_id, is_active, programming_language, level,
    preferred_languages, preferred_level, biography, location,
    created_at, updated_at
"#;

const MATCH_COLUMNS: &str = r#"
    id, user_a, user_b, status, score, initiated_by, created_at, updated_at
"#;

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

    /// Insert or replace a profile
    ///
    /// `created_at` survives updates; `updated_at` is refreshed.
    pub async fn upsert_profile(&self, profile: &MatchProfile) -> Result<MatchProfile, StoreError> {
        let query = format!(
            r#"
            INSERT INTO match_profiles (
                user_id, is_active, programming_language, level,
                preferred_languages, preferred_level, biography, location,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET
                is_active = EXCLUDED.is_active,
                programming_language = EXCLUDED.programming_language,
                level = EXCLUDED.level,
                preferred_languages = EXCLUDED.preferred_languages,
                preferred_level = EXCLUDED.preferred_level,
                biography = EXCLUDED.biography,
                location = EXCLUDED.location,
                updated_at = NOW()
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&profile.user_id)
            .bind(profile.is_active)
            .bind(&profile.programming_language)
            .bind(profile.level.as_str())
            .bind(&profile.preferences.preferred_languages)
            .bind(profile.preferences.preferred_level.map(|l| l.as_str()))
            .bind(&profile.biography)
            .bind(&profile.location)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Upserted profile {}", profile.user_id);

        profile_from_row(&row)
    }

    /// Fetch a single profile
    pub async fn get_profile(&self, user_id: &str) -> Result<MatchProfile, StoreError> {
        let query = format!("SELECT {} FROM match_profiles WHERE user_id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Profile not found for user {}", user_id)))?;

        profile_from_row(&row)
    }

    /// Fetch every profile except `user_id`'s, oldest first
    ///
    /// Inactive profiles are included; eligibility is decided by the
    /// recommender so the whole pipeline stays in one place.
    pub async fn list_other_profiles(&self, user_id: &str) -> Result<Vec<MatchProfile>, StoreError> {
        let query = format!(
            "SELECT {} FROM match_profiles WHERE user_id <> $1 ORDER BY created_at, user_id",
            PROFILE_COLUMNS
        );

        let rows = sqlx::query(&query).bind(user_id).fetch_all(&self.pool).await?;

        let profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} candidate profiles for {}", profiles.len(), user_id);

        Ok(profiles)
    }

    /// All matches where `user_id` sits on either side, newest first
    pub async fn get_matches_for_user(&self, user_id: &str) -> Result<Vec<Match>, StoreError> {
        let query = format!(
            "SELECT {} FROM matches WHERE user_a = $1 OR user_b = $1 ORDER BY created_at DESC",
            MATCH_COLUMNS
        );

        let rows = sqlx::query(&query).bind(user_id).fetch_all(&self.pool).await?;

        rows.iter().map(match_from_row).collect()
    }

    /// Fetch a single match by id
    pub async fn get_match(&self, id: uuid::Uuid) -> Result<Match, StoreError> {
        let query = format!("SELECT {} FROM matches WHERE id = $1", MATCH_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Match not found: {}", id)))?;

        match_from_row(&row)
    }

    /// Persist a freshly opened match
    pub async fn insert_match(&self, record: &Match) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO matches (id, user_a, user_b, status, score, initiated_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(query)
            .bind(record.id)
            .bind(&record.user_a)
            .bind(&record.user_b)
            .bind(record.status.as_str())
            .bind(i16::from(record.score))
            .bind(&record.initiated_by)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(format!(
                    "A match between {} and {} already exists",
                    record.user_a, record.user_b
                )),
                other => StoreError::SqlxError(other),
            })?;

        tracing::debug!(
            "Inserted match {}: {} -> {} (score {})",
            record.id,
            record.user_a,
            record.user_b,
            record.score
        );

        Ok(())
    }

    /// Store a status change if the row is still in `expected`
    ///
    /// Returns `false` when the match is gone or another request already
    /// moved it out of `expected`.
    pub async fn update_match_status(&self, record: &Match, expected: MatchStatus) -> Result<bool, StoreError> {
        let query = r#"
            UPDATE matches
            SET status = $2, updated_at = $3
            WHERE id = $1 AND status = $4
        "#;

        let result = sqlx::query(query)
            .bind(record.id)
            .bind(record.status.as_str())
            .bind(record.updated_at)
            .bind(expected.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a match record
    pub async fn delete_match(&self, id: uuid::Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn profile_from_row(row: &PgRow) -> Result<MatchProfile, StoreError> {
    let level: String = row.try_get("level")?;
    let preferred_level: Option<String> = row.try_get("preferred_level")?;

    Ok(MatchProfile {
        user_id: row.try_get("user_id")?,
        is_active: row.try_get("is_active")?,
        programming_language: row.try_get("programming_language")?,
        level: parse_level(&level)?,
        preferences: Preferences {
            preferred_languages: row.try_get("preferred_languages")?,
            preferred_level: preferred_level.as_deref().map(parse_level).transpose()?,
        },
        biography: row.try_get("biography")?,
        location: row.try_get("location")?,
        created_at: Some(row.try_get("created_at")?),
        updated_at: Some(row.try_get("updated_at")?),
    })
}

fn match_from_row(row: &PgRow) -> Result<Match, StoreError> {
    let status: String = row.try_get("status")?;
    let score: i16 = row.try_get("score")?;

    Ok(Match {
        id: row.try_get("id")?,
        user_a: row.try_get("user_a")?,
        user_b: row.try_get("user_b")?,
        status: status.parse::<MatchStatus>().map_err(StoreError::InvalidData)?,
        score: u8::try_from(score).map_err(|_| StoreError::InvalidData(format!("score out of range: {}", score)))?,
        initiated_by: row.try_get("initiated_by")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn parse_level(value: &str) -> Result<Level, StoreError> {
    value.parse::<Level>().map_err(StoreError::InvalidData)
}
