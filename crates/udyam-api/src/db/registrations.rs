//! Persistence for the `registrations` table.
//!
//! The full aggregate is stored as a JSONB `payload` column; the indexed
//! columns (`status`, `aadhaar`, `pan`, `udyam_number`) exist for the
//! table's unique and filter indexes, which back the in-memory store's
//! uniqueness guarantees across restarts and instances.

use sqlx::PgPool;
use uuid::Uuid;

use udyam_state::Registration;

use crate::state::DuplicateIdentity;

#[derive(sqlx::FromRow)]
struct RegistrationRow {
    id: Uuid,
    payload: serde_json::Value,
}

impl RegistrationRow {
    /// Parse the JSONB payload back into the aggregate.
    ///
    /// A row that fails to parse (a schema drift artifact) is logged and
    /// skipped rather than failing the whole hydration.
    fn into_registration(self) -> Option<Registration> {
        match serde_json::from_value(self.payload) {
            Ok(registration) => Some(registration),
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "skipping unparseable registration row");
                None
            }
        }
    }
}

/// Load every registration, for startup hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Registration>, sqlx::Error> {
    let rows: Vec<RegistrationRow> =
        sqlx::query_as("SELECT id, payload FROM registrations ORDER BY created_at")
            .fetch_all(pool)
            .await?;
    Ok(rows
        .into_iter()
        .filter_map(RegistrationRow::into_registration)
        .collect())
}

/// Insert a newly created registration.
pub async fn insert(pool: &PgPool, registration: &Registration) -> Result<(), sqlx::Error> {
    let payload = serde_json::to_value(registration)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    sqlx::query(
        "INSERT INTO registrations (id, status, aadhaar, pan, udyam_number, payload, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(registration.id.as_uuid())
    .bind(registration.status.as_str())
    .bind(registration.entrepreneur.aadhaar_number.as_str())
    .bind(registration.entrepreneur.pan_number.as_str())
    .bind(registration.udyam_number.as_ref().map(|u| u.as_str()))
    .bind(payload)
    .bind(registration.created_at)
    .bind(registration.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Replace a registration's row after an update or status transition.
pub async fn update(pool: &PgPool, registration: &Registration) -> Result<(), sqlx::Error> {
    let payload = serde_json::to_value(registration)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    sqlx::query(
        "UPDATE registrations
         SET status = $2, aadhaar = $3, pan = $4, udyam_number = $5, payload = $6, updated_at = $7
         WHERE id = $1",
    )
    .bind(registration.id.as_uuid())
    .bind(registration.status.as_str())
    .bind(registration.entrepreneur.aadhaar_number.as_str())
    .bind(registration.entrepreneur.pan_number.as_str())
    .bind(registration.udyam_number.as_ref().map(|u| u.as_str()))
    .bind(payload)
    .bind(registration.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Delete a registration's row.
pub async fn delete(pool: &PgPool, id: &Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM registrations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Map a unique-index violation to the identity field it guards.
///
/// Lets the write-through path surface the same duplicate message the
/// in-memory indexes produce when another instance won the race.
pub fn duplicate_from(err: &sqlx::Error) -> Option<DuplicateIdentity> {
    let db_err = match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => db_err,
        _ => return None,
    };
    match db_err.constraint() {
        Some("registrations_aadhaar_key") => Some(DuplicateIdentity::Aadhaar),
        Some("registrations_pan_key") => Some(DuplicateIdentity::Pan),
        Some("registrations_udyam_number_key") => Some(DuplicateIdentity::UdyamNumber),
        _ => None,
    }
}
