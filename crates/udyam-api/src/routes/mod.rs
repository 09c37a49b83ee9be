//! HTTP route modules.

use udyam_state::Registration;

use crate::error::AppError;
use crate::state::AppState;

pub mod documents;
pub mod health;
pub mod registration;

/// Write-through after a mutation committed in memory. A failed persist
/// is surfaced because the record would silently revert on restart.
pub(crate) async fn persist_update(
    state: &AppState,
    record: &Registration,
) -> Result<(), AppError> {
    let Some(pool) = &state.db_pool else {
        return Ok(());
    };
    if let Err(e) = crate::db::registrations::update(pool, record).await {
        if let Some(dup) = crate::db::registrations::duplicate_from(&e) {
            return Err(dup.into());
        }
        tracing::error!(id = %record.id, error = %e, "failed to persist registration update");
        return Err(AppError::Internal(
            "registration updated in-memory but database persist failed".to_string(),
        ));
    }
    Ok(())
}
