//! PostgreSQL implementation of IntakeRepository.
//!
//! Persists IntakeAnswers aggregates with the answer map and completed
//! step set stored as JSONB.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, IntakeId, StepId, TicketId, Timestamp,
};
use crate::domain::intake::{
    AnswerValue, Consent, IntakeAnswers, LastFourSsn, PrimaryIdentity, QuestionKey,
};
use crate::ports::IntakeRepository;

/// PostgreSQL implementation of IntakeRepository.
#[derive(Clone)]
pub struct PostgresIntakeRepository {
    pool: PgPool,
}

impl PostgresIntakeRepository {
    /// Creates a new PostgresIntakeRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IntakeRepository for PostgresIntakeRepository {
    async fn find_by_client(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<IntakeAnswers>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, client_id, ticket_id, answers, completed_steps, current_step,
                   consent_given_at, consent_ip,
                   primary_first_name, primary_last_name, primary_last_four_ssn,
                   primary_birth_date,
                   completed_at, created_at, updated_at
            FROM intakes
            WHERE client_id = $1
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch intake: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let intake = row_to_intake(row)?;
                Ok(Some(intake))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, intake: &IntakeAnswers) -> Result<(), DomainError> {
        let answers = serde_json::to_value(intake.answers()).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to serialize answers: {}", e),
            )
        })?;
        let completed_steps = serde_json::to_value(intake.completed_steps()).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to serialize completed steps: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO intakes (
                id, client_id, ticket_id, answers, completed_steps, current_step,
                consent_given_at, consent_ip,
                primary_first_name, primary_last_name, primary_last_four_ssn,
                primary_birth_date,
                completed_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO UPDATE SET
                ticket_id = EXCLUDED.ticket_id,
                answers = EXCLUDED.answers,
                completed_steps = EXCLUDED.completed_steps,
                current_step = EXCLUDED.current_step,
                consent_given_at = EXCLUDED.consent_given_at,
                consent_ip = EXCLUDED.consent_ip,
                primary_first_name = EXCLUDED.primary_first_name,
                primary_last_name = EXCLUDED.primary_last_name,
                primary_last_four_ssn = EXCLUDED.primary_last_four_ssn,
                primary_birth_date = EXCLUDED.primary_birth_date,
                completed_at = EXCLUDED.completed_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(intake.id().as_uuid())
        .bind(intake.client_id().as_uuid())
        .bind(intake.ticket_id().map(TicketId::as_str))
        .bind(answers)
        .bind(completed_steps)
        .bind(intake.current_step().map(StepId::as_str))
        .bind(intake.consent().map(|c| *c.given_at().as_datetime()))
        .bind(intake.consent().map(Consent::ip_address))
        .bind(intake.primary_identity().map(PrimaryIdentity::first_name))
        .bind(intake.primary_identity().map(PrimaryIdentity::last_name))
        .bind(intake.primary_identity().map(|p| p.last_four_ssn().as_str()))
        .bind(intake.primary_identity().map(PrimaryIdentity::birth_date))
        .bind(intake.completed_at().map(|t| *t.as_datetime()))
        .bind(intake.created_at().as_datetime())
        .bind(intake.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save intake: {}", e),
            )
        })?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_intake(row: sqlx::postgres::PgRow) -> Result<IntakeAnswers, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let client_id: uuid::Uuid = row.try_get("client_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get client_id: {}", e),
        )
    })?;

    let ticket_id: Option<String> = row.try_get("ticket_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get ticket_id: {}", e),
        )
    })?;
    let ticket_id = ticket_id
        .map(TicketId::new)
        .transpose()
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid ticket_id: {}", e))
        })?;

    let answers_value: serde_json::Value = row.try_get("answers").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get answers: {}", e),
        )
    })?;
    let answers: BTreeMap<QuestionKey, AnswerValue> = serde_json::from_value(answers_value)
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to parse answers: {}", e),
            )
        })?;

    let completed_value: serde_json::Value = row.try_get("completed_steps").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get completed_steps: {}", e),
        )
    })?;
    let completed_steps: BTreeSet<StepId> =
        serde_json::from_value(completed_value).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to parse completed_steps: {}", e),
            )
        })?;

    let current_step: Option<String> = row.try_get("current_step").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get current_step: {}", e),
        )
    })?;
    let current_step = current_step
        .map(StepId::new)
        .transpose()
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid current_step: {}", e),
            )
        })?;

    let consent_given_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("consent_given_at").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get consent_given_at: {}", e),
            )
        })?;
    let consent_ip: Option<String> = row.try_get("consent_ip").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get consent_ip: {}", e),
        )
    })?;
    let consent = match (consent_given_at, consent_ip) {
        (Some(given_at), Some(ip)) => Some(
            Consent::new(Timestamp::from_datetime(given_at), ip).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid consent: {}", e))
            })?,
        ),
        _ => None,
    };

    let first_name: Option<String> = row.try_get("primary_first_name").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get primary_first_name: {}", e),
        )
    })?;
    let last_name: Option<String> = row.try_get("primary_last_name").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get primary_last_name: {}", e),
        )
    })?;
    let last_four: Option<String> = row.try_get("primary_last_four_ssn").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get primary_last_four_ssn: {}", e),
        )
    })?;
    let birth_date: Option<chrono::NaiveDate> = row.try_get("primary_birth_date").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get primary_birth_date: {}", e),
        )
    })?;
    let primary_identity = match (first_name, last_name, last_four, birth_date) {
        (Some(first), Some(last), Some(last_four), Some(birth_date)) => {
            let last_four = LastFourSsn::new(last_four).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid primary_last_four_ssn: {}", e),
                )
            })?;
            Some(
                PrimaryIdentity::new(first, last, last_four, birth_date).map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid primary identity: {}", e),
                    )
                })?,
            )
        }
        _ => None,
    };

    let completed_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("completed_at").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get completed_at: {}", e),
            )
        })?;

    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get created_at: {}", e),
        )
    })?;

    let updated_at: chrono::DateTime<chrono::Utc> = row.try_get("updated_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get updated_at: {}", e),
        )
    })?;

    Ok(IntakeAnswers::reconstitute(
        IntakeId::from_uuid(id),
        ClientId::from_uuid(client_id),
        ticket_id,
        answers,
        completed_steps,
        current_step,
        consent,
        primary_identity,
        completed_at.map(Timestamp::from_datetime),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
