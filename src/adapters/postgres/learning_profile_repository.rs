//! PostgreSQL implementation of LearningProfileRepository.
//!
//! Expected table (migrations are managed outside this service):
//!
//! ```sql
//! CREATE TYPE learning_profile_type AS ENUM
//!     ('adhd', 'dyslexia', 'autism', 'mixed', 'neurotypical');
//!
//! CREATE TABLE learning_profiles (
//!     id                UUID PRIMARY KEY,
//!     user_id           UUID NOT NULL UNIQUE,
//!     profile_type      learning_profile_type NOT NULL,
//!     assessment_score  JSONB NOT NULL,
//!     preferences       JSONB NOT NULL,
//!     cognitive_metrics JSONB NOT NULL,
//!     created_at        TIMESTAMPTZ NOT NULL,
//!     updated_at        TIMESTAMPTZ NOT NULL
//! );
//! ```
//!
//! The `UNIQUE (user_id)` constraint is what makes "one profile per user"
//! hold under concurrent submissions.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;

use super::column;
use crate::domain::assessment::LearningProfileAnalysis;
use crate::domain::foundation::{DomainError, ErrorCode, LearningProfileId, Timestamp, UserId};
use crate::domain::learning::StoredLearningProfile;
use crate::ports::LearningProfileRepository;

/// PostgreSQL implementation of LearningProfileRepository.
#[derive(Clone)]
pub struct PostgresLearningProfileRepository {
    pool: PgPool,
}

impl PostgresLearningProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const RETURNED_COLUMNS: &str =
    "id, user_id::text AS user_id, assessment_score, created_at, updated_at";

#[async_trait]
impl LearningProfileRepository for PostgresLearningProfileRepository {
    async fn insert(&self, profile: &StoredLearningProfile) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO learning_profiles (
                id, user_id, profile_type, assessment_score, preferences,
                cognitive_metrics, created_at, updated_at
            ) VALUES ($1, $2::uuid, $3::learning_profile_type, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(profile.user_id.as_str())
        .bind(profile.profile_type.as_str())
        .bind(Json(&profile.assessment_score))
        .bind(Json(&profile.preferences))
        .bind(Json(&profile.cognitive_metrics))
        .bind(profile.created_at.as_datetime())
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(DomainError::new(
                ErrorCode::ProfileAlreadyExists,
                format!("User {} already has a learning profile", profile.user_id),
            )),
            Err(e) => Err(DomainError::database("Failed to insert learning profile", e)),
        }
    }

    async fn upsert(&self, profile: &StoredLearningProfile) -> Result<StoredLearningProfile, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO learning_profiles (
                id, user_id, profile_type, assessment_score, preferences,
                cognitive_metrics, created_at, updated_at
            ) VALUES ($1, $2::uuid, $3::learning_profile_type, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                profile_type = EXCLUDED.profile_type,
                assessment_score = EXCLUDED.assessment_score,
                preferences = EXCLUDED.preferences,
                cognitive_metrics = EXCLUDED.cognitive_metrics,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            RETURNED_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(profile.id.as_uuid())
            .bind(profile.user_id.as_str())
            .bind(profile.profile_type.as_str())
            .bind(Json(&profile.assessment_score))
            .bind(Json(&profile.preferences))
            .bind(Json(&profile.cognitive_metrics))
            .bind(profile.created_at.as_datetime())
            .bind(profile.updated_at.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to upsert learning profile", e))?;

        row_to_profile(row)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StoredLearningProfile>, DomainError> {
        let sql = format!(
            "SELECT {} FROM learning_profiles WHERE user_id = $1::uuid",
            RETURNED_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch learning profile", e))?;

        row.map(row_to_profile).transpose()
    }
}

fn row_to_profile(row: PgRow) -> Result<StoredLearningProfile, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let user_id: String = column(&row, "user_id")?;
    let analysis: Json<LearningProfileAnalysis> = column(&row, "assessment_score")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(&row, "updated_at")?;

    let user_id = UserId::new(user_id).map_err(|e| DomainError::database("Invalid user_id", e))?;

    Ok(StoredLearningProfile::reconstitute(
        LearningProfileId::from_uuid(id),
        user_id,
        analysis.0,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
