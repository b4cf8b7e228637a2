//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAssessmentResponseRepository` - raw questionnaire submissions
//! - `PostgresLearningProfileRepository` - derived learning profiles
//!
//! Both bind `user_id` as text and cast to `uuid` in SQL, since identity
//! provider subjects are UUIDs.

mod assessment_response_repository;
mod learning_profile_repository;

pub use assessment_response_repository::PostgresAssessmentResponseRepository;
pub use learning_profile_repository::PostgresLearningProfileRepository;

use sqlx::postgres::PgRow;
use sqlx::{Decode, Postgres, Row, Type};

use crate::domain::foundation::DomainError;

/// Reads a column, mapping decode failures to `DatabaseError`.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}
