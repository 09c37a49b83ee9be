//! # Registration API
//!
//! CRUD plus the review lifecycle for registration records. Every
//! transition goes through the aggregate's guarded methods; handlers only
//! translate outcomes into the response envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use udyam_core::{MsmeCategory, RegistrationId};
use udyam_state::{Registration, RegistrationInput, RegistrationStatus, ReviewEvidence, StatusError};

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::routes::persist_update;
use crate::state::AppState;

/// A full registration record as served to clients, with the derived
/// MSME classification attached.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationView {
    #[serde(flatten)]
    registration: Registration,
    /// `micro`, `small`, `medium`, or null above the medium ceilings.
    #[schema(value_type = Option<String>, example = "micro")]
    msme_category: Option<MsmeCategory>,
}

impl From<Registration> for RegistrationView {
    fn from(registration: Registration) -> Self {
        let msme_category = registration.msme_category();
        Self {
            registration,
            msme_category,
        }
    }
}

/// Query parameters for the listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// 1-based page number, default 1.
    pub page: Option<usize>,
    /// Page size, default 10.
    pub limit: Option<usize>,
    /// Filter to one status (`draft`, `submitted`, `under_review`,
    /// `approved`, `rejected`). Unrecognized values match nothing.
    pub status: Option<String>,
}

/// Pagination block on the listing response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Listing payload: summaries (documents omitted) plus pagination.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationListData {
    #[schema(value_type = Vec<Object>)]
    pub registrations: Vec<serde_json::Value>,
    pub pagination: Pagination,
}

/// Build the registration router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/registration",
            post(create_registration).get(list_registrations),
        )
        .route(
            "/api/registration/:id",
            get(get_registration)
                .put(update_registration)
                .delete(delete_registration),
        )
        .route("/api/registration/udyam/:udyamNumber", get(get_by_udyam))
        .route("/api/registration/:id/submit", post(submit_registration))
        .route("/api/registration/:id/approve", post(approve_registration))
        .route("/api/registration/:id/reject", post(reject_registration))
}

// ─── Helpers ─────────────────────────────────────────────────────────

fn parse_id(raw: &str) -> Result<RegistrationId, AppError> {
    raw.parse().map_err(|_| AppError::registration_not_found())
}

/// Strip the document slots from a serialized record, for list summaries.
fn summarize(view: RegistrationView) -> Result<serde_json::Value, AppError> {
    let mut value =
        serde_json::to_value(view).map_err(|e| AppError::Internal(e.to_string()))?;
    if let Some(object) = value.as_object_mut() {
        object.remove("documents");
    }
    Ok(value)
}

/// Apply a guarded status transition and respond with the given message.
async fn transition(
    state: AppState,
    raw_id: String,
    message: &str,
    apply: impl FnOnce(&mut Registration) -> Result<(), StatusError>,
) -> Result<Json<ApiResponse<RegistrationView>>, AppError> {
    let id = parse_id(&raw_id)?;
    let record = state
        .registrations
        .try_update(&id, |r| apply(r).map_err(AppError::from))
        .ok_or_else(AppError::registration_not_found)??;

    persist_update(&state, &record).await?;
    Ok(Json(ApiResponse::with_message(message, record.into())))
}

// ─── Handlers ────────────────────────────────────────────────────────

/// POST /api/registration — Create a draft registration.
#[utoipa::path(
    post,
    path = "/api/registration",
    request_body = RegistrationInput,
    responses(
        (status = 201, description = "Registration created", body = RegistrationView),
        (status = 400, description = "Validation failure or duplicate identity", body = crate::error::ErrorBody),
    ),
    tag = "registration"
)]
async fn create_registration(
    State(state): State<AppState>,
    body: Result<Json<RegistrationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<RegistrationView>>), AppError> {
    let Json(input) = body.map_err(|rej| AppError::BadRequest(rej.body_text()))?;
    let registration = input.build()?;
    let record = state.registrations.insert(registration)?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::registrations::insert(pool, &record).await {
            // Roll the in-memory insert back so a retry is clean.
            state.registrations.remove(&record.id);
            if let Some(dup) = crate::db::registrations::duplicate_from(&e) {
                return Err(dup.into());
            }
            tracing::error!(id = %record.id, error = %e, "failed to persist new registration");
            return Err(AppError::Internal(
                "registration could not be persisted".to_string(),
            ));
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Registration created successfully",
            record.into(),
        )),
    ))
}

/// GET /api/registration — Paginated listing, newest first.
#[utoipa::path(
    get,
    path = "/api/registration",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of registration summaries", body = RegistrationListData),
    ),
    tag = "registration"
)]
async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<RegistrationListData>>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).max(1);

    let result = match query.status.as_deref() {
        // An unrecognized status matches no records rather than erroring.
        Some(raw) => match raw.parse::<RegistrationStatus>() {
            Ok(status) => state.registrations.page(page, limit, Some(status)),
            Err(_) => crate::state::Page {
                records: Vec::new(),
                total: 0,
            },
        },
        None => state.registrations.page(page, limit, None),
    };

    let total_pages = result.total.div_ceil(limit);
    let registrations = result
        .records
        .into_iter()
        .map(|r| summarize(r.into()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ApiResponse::data(RegistrationListData {
        registrations,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_records: result.total,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    })))
}

/// GET /api/registration/:id — Fetch one full record.
#[utoipa::path(
    get,
    path = "/api/registration/{id}",
    params(("id" = String, Path, description = "Registration UUID")),
    responses(
        (status = 200, description = "The registration", body = RegistrationView),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "registration"
)]
async fn get_registration(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<RegistrationView>>, AppError> {
    let id = parse_id(&raw_id)?;
    let record = state
        .registrations
        .get(&id)
        .ok_or_else(AppError::registration_not_found)?;
    Ok(Json(ApiResponse::data(record.into())))
}

/// GET /api/registration/udyam/:udyamNumber — Lookup by issued number.
#[utoipa::path(
    get,
    path = "/api/registration/udyam/{udyamNumber}",
    params(("udyamNumber" = String, Path, description = "Issued Udyam number")),
    responses(
        (status = 200, description = "The registration", body = RegistrationView),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "registration"
)]
async fn get_by_udyam(
    State(state): State<AppState>,
    Path(udyam_number): Path<String>,
) -> Result<Json<ApiResponse<RegistrationView>>, AppError> {
    let record = state
        .registrations
        .get_by_udyam(&udyam_number)
        .ok_or_else(AppError::registration_not_found)?;
    Ok(Json(ApiResponse::data(record.into())))
}

/// PUT /api/registration/:id — Replace a draft's sections.
#[utoipa::path(
    put,
    path = "/api/registration/{id}",
    params(("id" = String, Path, description = "Registration UUID")),
    request_body = RegistrationInput,
    responses(
        (status = 200, description = "Registration updated", body = RegistrationView),
        (status = 400, description = "Not a draft, validation failure, or duplicate identity", body = crate::error::ErrorBody),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "registration"
)]
async fn update_registration(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<RegistrationInput>, JsonRejection>,
) -> Result<Json<ApiResponse<RegistrationView>>, AppError> {
    let Json(input) = body.map_err(|rej| AppError::BadRequest(rej.body_text()))?;
    let id = parse_id(&raw_id)?;

    let record = state
        .registrations
        .try_update(&id, |r| {
            r.ensure_updatable()?;
            input.apply_to(r)?;
            Ok::<_, AppError>(())
        })
        .ok_or_else(AppError::registration_not_found)??;

    persist_update(&state, &record).await?;
    Ok(Json(ApiResponse::with_message(
        "Registration updated successfully",
        record.into(),
    )))
}

/// DELETE /api/registration/:id — Remove a draft.
#[utoipa::path(
    delete,
    path = "/api/registration/{id}",
    params(("id" = String, Path, description = "Registration UUID")),
    responses(
        (status = 200, description = "Registration deleted"),
        (status = 400, description = "Registration is no longer a draft", body = crate::error::ErrorBody),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "registration"
)]
async fn delete_registration(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id(&raw_id)?;
    let removed = state
        .registrations
        .try_remove(&id, |r| r.ensure_deletable())
        .ok_or_else(AppError::registration_not_found)?
        .map_err(AppError::from)?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::registrations::delete(pool, removed.id.as_uuid()).await {
            tracing::error!(id = %removed.id, error = %e, "failed to delete registration row");
            return Err(AppError::Internal(
                "registration removed in-memory but database delete failed".to_string(),
            ));
        }
    }
    Ok(Json(ApiResponse::message_only(
        "Registration deleted successfully",
    )))
}

/// POST /api/registration/:id/submit — `draft` → `submitted`.
#[utoipa::path(
    post,
    path = "/api/registration/{id}/submit",
    params(("id" = String, Path, description = "Registration UUID")),
    responses(
        (status = 200, description = "Registration submitted", body = RegistrationView),
        (status = 400, description = "Already submitted", body = crate::error::ErrorBody),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "registration"
)]
async fn submit_registration(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<RegistrationView>>, AppError> {
    transition(state, raw_id, "Registration submitted successfully", |r| {
        r.submit()
    })
    .await
}

/// POST /api/registration/:id/approve — Issue a Udyam number.
#[utoipa::path(
    post,
    path = "/api/registration/{id}/approve",
    params(("id" = String, Path, description = "Registration UUID")),
    request_body = ReviewEvidence,
    responses(
        (status = 200, description = "Registration approved", body = RegistrationView),
        (status = 400, description = "Not in a reviewable status", body = crate::error::ErrorBody),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "registration"
)]
async fn approve_registration(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Option<Json<ReviewEvidence>>,
) -> Result<Json<ApiResponse<RegistrationView>>, AppError> {
    let evidence = body.map(|Json(e)| e).unwrap_or_default();
    transition(state, raw_id, "Registration approved successfully", |r| {
        r.approve(evidence)
    })
    .await
}

/// POST /api/registration/:id/reject — Reject with remarks.
#[utoipa::path(
    post,
    path = "/api/registration/{id}/reject",
    params(("id" = String, Path, description = "Registration UUID")),
    request_body = ReviewEvidence,
    responses(
        (status = 200, description = "Registration rejected", body = RegistrationView),
        (status = 400, description = "Not in a reviewable status", body = crate::error::ErrorBody),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "registration"
)]
async fn reject_registration(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Option<Json<ReviewEvidence>>,
) -> Result<Json<ApiResponse<RegistrationView>>, AppError> {
    let evidence = body.map(|Json(e)| e).unwrap_or_default();
    transition(state, raw_id, "Registration rejected successfully", |r| {
        r.reject(evidence)
    })
    .await
}
