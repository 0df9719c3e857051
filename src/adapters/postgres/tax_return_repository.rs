//! PostgreSQL implementation of TaxReturnRepository.
//!
//! Persists TaxReturn aggregates. Status is stored as its numeric code,
//! so the database orders rows the same way the domain does.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, TaxReturnId, Timestamp, UserId,
};
use crate::domain::tax_return::{Signature, TaxReturn, TaxReturnStatus};
use crate::ports::TaxReturnRepository;

/// PostgreSQL implementation of TaxReturnRepository.
#[derive(Clone)]
pub struct PostgresTaxReturnRepository {
    pool: PgPool,
}

impl PostgresTaxReturnRepository {
    /// Creates a new PostgresTaxReturnRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaxReturnRepository for PostgresTaxReturnRepository {
    async fn find_by_id(&self, id: &TaxReturnId) -> Result<Option<TaxReturn>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, client_id, year, status, assigned_user_id,
                   primary_signature_name, primary_signed_at, primary_signed_ip,
                   spouse_signature_name, spouse_signed_at, spouse_signed_ip,
                   created_at, updated_at
            FROM tax_returns
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch tax return: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let tax_return = row_to_tax_return(row)?;
                Ok(Some(tax_return))
            }
            None => Ok(None),
        }
    }

    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<TaxReturn>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, client_id, year, status, assigned_user_id,
                   primary_signature_name, primary_signed_at, primary_signed_ip,
                   spouse_signature_name, spouse_signed_at, spouse_signed_ip,
                   created_at, updated_at
            FROM tax_returns
            WHERE client_id = $1
            ORDER BY year ASC
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch tax returns by client: {}", e),
            )
        })?;

        let tax_returns: Result<Vec<TaxReturn>, DomainError> =
            rows.into_iter().map(row_to_tax_return).collect();

        tax_returns
    }

    async fn save(&self, tax_return: &TaxReturn) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO tax_returns (
                id, client_id, year, status, assigned_user_id,
                primary_signature_name, primary_signed_at, primary_signed_ip,
                spouse_signature_name, spouse_signed_at, spouse_signed_ip,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                assigned_user_id = EXCLUDED.assigned_user_id,
                primary_signature_name = EXCLUDED.primary_signature_name,
                primary_signed_at = EXCLUDED.primary_signed_at,
                primary_signed_ip = EXCLUDED.primary_signed_ip,
                spouse_signature_name = EXCLUDED.spouse_signature_name,
                spouse_signed_at = EXCLUDED.spouse_signed_at,
                spouse_signed_ip = EXCLUDED.spouse_signed_ip,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(tax_return.id().as_uuid())
        .bind(tax_return.client_id().as_uuid())
        .bind(tax_return.year() as i16)
        .bind(status_to_code(tax_return.status()))
        .bind(tax_return.assigned_user_id().map(UserId::as_str))
        .bind(tax_return.primary_signature().map(Signature::name))
        .bind(
            tax_return
                .primary_signature()
                .map(|s| *s.signed_at().as_datetime()),
        )
        .bind(tax_return.primary_signature().map(Signature::ip_address))
        .bind(tax_return.spouse_signature().map(Signature::name))
        .bind(
            tax_return
                .spouse_signature()
                .map(|s| *s.signed_at().as_datetime()),
        )
        .bind(tax_return.spouse_signature().map(Signature::ip_address))
        .bind(tax_return.created_at().as_datetime())
        .bind(tax_return.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save tax return: {}", e),
            )
        })?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn status_to_code(status: TaxReturnStatus) -> i16 {
    status.code() as i16
}

fn code_to_status(code: i16) -> Result<TaxReturnStatus, DomainError> {
    TaxReturnStatus::from_code(code as u16).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid tax return status code: {}", code),
        )
    })
}

fn signature_from_columns(
    name: Option<String>,
    signed_at: Option<chrono::DateTime<chrono::Utc>>,
    ip_address: Option<String>,
) -> Result<Option<Signature>, DomainError> {
    match (name, signed_at, ip_address) {
        (Some(name), Some(signed_at), Some(ip_address)) => Ok(Some(
            Signature::new(name, Timestamp::from_datetime(signed_at), ip_address).map_err(
                |e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid stored signature: {}", e),
                    )
                },
            )?,
        )),
        _ => Ok(None),
    }
}

fn row_to_tax_return(row: sqlx::postgres::PgRow) -> Result<TaxReturn, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let client_id: uuid::Uuid = row.try_get("client_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get client_id: {}", e),
        )
    })?;

    let year: i16 = row.try_get("year").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get year: {}", e),
        )
    })?;

    let status_code: i16 = row.try_get("status").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get status: {}", e),
        )
    })?;
    let status = code_to_status(status_code)?;

    let assigned_user_id: Option<String> = row.try_get("assigned_user_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get assigned_user_id: {}", e),
        )
    })?;
    let assigned_user_id = assigned_user_id
        .map(UserId::new)
        .transpose()
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid assigned_user_id: {}", e),
            )
        })?;

    let primary_name: Option<String> = row.try_get("primary_signature_name").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get primary_signature_name: {}", e),
        )
    })?;
    let primary_signed_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("primary_signed_at").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get primary_signed_at: {}", e),
            )
        })?;
    let primary_ip: Option<String> = row.try_get("primary_signed_ip").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get primary_signed_ip: {}", e),
        )
    })?;
    let primary_signature = signature_from_columns(primary_name, primary_signed_at, primary_ip)?;

    let spouse_name: Option<String> = row.try_get("spouse_signature_name").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get spouse_signature_name: {}", e),
        )
    })?;
    let spouse_signed_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("spouse_signed_at").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get spouse_signed_at: {}", e),
            )
        })?;
    let spouse_ip: Option<String> = row.try_get("spouse_signed_ip").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get spouse_signed_ip: {}", e),
        )
    })?;
    let spouse_signature = signature_from_columns(spouse_name, spouse_signed_at, spouse_ip)?;

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

    Ok(TaxReturn::reconstitute(
        TaxReturnId::from_uuid(id),
        ClientId::from_uuid(client_id),
        year as u16,
        status,
        assigned_user_id,
        primary_signature,
        spouse_signature,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
