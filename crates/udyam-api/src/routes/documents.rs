//! # Document API
//!
//! Multipart upload, listing, download, and deletion of supporting
//! documents. Files land in the mock object store; the registration
//! record keeps only the resulting URLs in its typed slots.

use axum::extract::{Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use udyam_core::{is_allowed_content_type, RegistrationId, MAX_UPLOAD_BYTES};
use udyam_state::{DocumentType, Documents};

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::routes::persist_update;
use crate::state::AppState;

/// Maximum files accepted by the multi-upload route.
const MAX_FILES: usize = 5;

/// Rejection message for disallowed content types.
const INVALID_FILE_TYPE: &str = "Invalid file type. Only JPEG, PNG, and PDF files are allowed.";

/// One stored upload, as reported back to the client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub document_type: String,
    pub url: String,
    pub public_id: String,
}

/// Download pointer for a stored document.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadInfo {
    pub document_type: String,
    pub download_url: String,
}

/// Build the documents router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/documents/upload/:registrationId", post(upload_document))
        .route(
            "/api/documents/upload-multiple/:registrationId",
            post(upload_multiple),
        )
        .route("/api/documents/:registrationId", get(list_documents))
        .route(
            "/api/documents/:registrationId/:documentType",
            axum::routing::delete(delete_document),
        )
        .route(
            "/api/documents/download/:registrationId/:documentType",
            get(download_document),
        )
}

// ─── Helpers ─────────────────────────────────────────────────────────

fn parse_registration_id(raw: &str) -> Result<RegistrationId, AppError> {
    raw.parse().map_err(|_| AppError::registration_not_found())
}

fn parse_document_type(raw: &str) -> Result<DocumentType, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid document type".to_string()))
}

/// A file part pulled out of the multipart stream.
struct FilePart {
    content_type: String,
    bytes: Vec<u8>,
}

impl FilePart {
    /// Apply the portal's file constraints: allowed content type, 5 MB cap.
    fn validate(&self) -> Result<(), AppError> {
        if !is_allowed_content_type(&self.content_type) {
            return Err(AppError::BadRequest(INVALID_FILE_TYPE.to_string()));
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest("File too large".to_string()));
        }
        Ok(())
    }
}

async fn read_file_part(field: axum::extract::multipart::Field<'_>) -> Result<FilePart, AppError> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(FilePart {
        content_type,
        bytes: bytes.to_vec(),
    })
}

/// Record an uploaded URL in the registration's slot and persist.
async fn attach_to_slot(
    state: &AppState,
    id: &RegistrationId,
    kind: DocumentType,
    url: String,
) -> Result<(), AppError> {
    let record = state
        .registrations
        .try_update(id, |r| {
            r.documents.set(kind, url);
            r.touch();
            Ok::<_, AppError>(())
        })
        .ok_or_else(AppError::registration_not_found)??;
    persist_update(state, &record).await
}

// ─── Handlers ────────────────────────────────────────────────────────

/// POST /api/documents/upload/:registrationId — Single-file upload.
///
/// Expects a `document` file part and a `documentType` text part.
#[utoipa::path(
    post,
    path = "/api/documents/upload/{registrationId}",
    params(("registrationId" = String, Path, description = "Registration UUID")),
    responses(
        (status = 200, description = "Document stored", body = UploadedDocument),
        (status = 400, description = "Missing file, missing or invalid type, disallowed content", body = crate::error::ErrorBody),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn upload_document(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadedDocument>>, AppError> {
    let mut file: Option<FilePart> = None;
    let mut document_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("document") => file = Some(read_file_part(field).await?),
            Some("documentType") => {
                document_type = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let raw_type = document_type
        .ok_or_else(|| AppError::BadRequest("Document type is required".to_string()))?;
    let kind = parse_document_type(&raw_type)?;
    file.validate()?;

    let id = parse_registration_id(&raw_id)?;
    if state.registrations.get(&id).is_none() {
        return Err(AppError::registration_not_found());
    }

    let stored = state
        .documents
        .put(&id, kind, &file.content_type, file.bytes, None);
    attach_to_slot(&state, &id, kind, stored.url.clone()).await?;

    Ok(Json(ApiResponse::with_message(
        "Document uploaded successfully",
        UploadedDocument {
            document_type: kind.as_str().to_string(),
            url: stored.url,
            public_id: stored.public_id,
        },
    )))
}

/// POST /api/documents/upload-multiple/:registrationId — Batch upload.
///
/// Expects up to five `documents` file parts with a parallel list of
/// `documentTypes` text parts (repeated fields or one JSON array).
#[utoipa::path(
    post,
    path = "/api/documents/upload-multiple/{registrationId}",
    params(("registrationId" = String, Path, description = "Registration UUID")),
    responses(
        (status = 200, description = "Documents stored", body = [UploadedDocument]),
        (status = 400, description = "Missing files, missing types, or count mismatch", body = crate::error::ErrorBody),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn upload_multiple(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Vec<UploadedDocument>>>, AppError> {
    let mut files: Vec<FilePart> = Vec::new();
    let mut raw_types: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("documents") => {
                if files.len() == MAX_FILES {
                    return Err(AppError::BadRequest("Too many files".to_string()));
                }
                files.push(read_file_part(field).await?);
            }
            Some("documentTypes") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Either repeated text fields or a single JSON array.
                match serde_json::from_str::<Vec<String>>(&text) {
                    Ok(list) => raw_types.extend(list),
                    Err(_) => raw_types.push(text),
                }
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files uploaded".to_string()));
    }
    if raw_types.is_empty() {
        return Err(AppError::BadRequest(
            "Document types array is required".to_string(),
        ));
    }
    if files.len() != raw_types.len() {
        return Err(AppError::BadRequest(
            "Number of files must match number of document types".to_string(),
        ));
    }

    let kinds = raw_types
        .iter()
        .map(|raw| parse_document_type(raw))
        .collect::<Result<Vec<_>, _>>()?;
    for file in &files {
        file.validate()?;
    }

    let id = parse_registration_id(&raw_id)?;
    if state.registrations.get(&id).is_none() {
        return Err(AppError::registration_not_found());
    }

    let mut uploaded = Vec::with_capacity(files.len());
    for (index, (file, kind)) in files.into_iter().zip(kinds).enumerate() {
        let stored = state
            .documents
            .put(&id, kind, &file.content_type, file.bytes, Some(index));
        attach_to_slot(&state, &id, kind, stored.url.clone()).await?;
        uploaded.push(UploadedDocument {
            document_type: kind.as_str().to_string(),
            url: stored.url,
            public_id: stored.public_id,
        });
    }

    Ok(Json(ApiResponse::with_message(
        "Documents uploaded successfully",
        uploaded,
    )))
}

/// GET /api/documents/:registrationId — The record's document slots.
#[utoipa::path(
    get,
    path = "/api/documents/{registrationId}",
    params(("registrationId" = String, Path, description = "Registration UUID")),
    responses(
        (status = 200, description = "The document slots", body = Documents),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn list_documents(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<Documents>>, AppError> {
    let id = parse_registration_id(&raw_id)?;
    let record = state
        .registrations
        .get(&id)
        .ok_or_else(AppError::registration_not_found)?;
    Ok(Json(ApiResponse::data(record.documents)))
}

/// DELETE /api/documents/:registrationId/:documentType — Clear a slot.
#[utoipa::path(
    delete,
    path = "/api/documents/{registrationId}/{documentType}",
    params(
        ("registrationId" = String, Path, description = "Registration UUID"),
        ("documentType" = String, Path, description = "Slot to clear"),
    ),
    responses(
        (status = 200, description = "Document removed"),
        (status = 400, description = "Invalid document type", body = crate::error::ErrorBody),
        (status = 404, description = "Registration or document not found", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn delete_document(
    State(state): State<AppState>,
    Path((raw_id, raw_type)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let kind = parse_document_type(&raw_type)?;
    let id = parse_registration_id(&raw_id)?;

    let mut cleared_urls: Vec<String> = Vec::new();
    let record = state
        .registrations
        .try_update(&id, |r| {
            if !r.documents.has(kind) {
                return Err(AppError::NotFound("Document not found".to_string()));
            }
            if kind == DocumentType::Others {
                cleared_urls.extend(r.documents.others.iter().cloned());
            } else if let Some(url) = r.documents.url(kind) {
                cleared_urls.push(url.to_string());
            }
            r.documents.clear(kind);
            r.touch();
            Ok(())
        })
        .ok_or_else(AppError::registration_not_found)??;

    // The slot is the source of truth; blob deletion is best-effort.
    for url in &cleared_urls {
        if let Err(e) = state.documents.delete_by_url(url) {
            tracing::warn!(%url, error = %e, "failed to delete stored object");
        }
    }

    persist_update(&state, &record).await?;
    Ok(Json(ApiResponse::message_only(
        "Document deleted successfully",
    )))
}

/// GET /api/documents/download/:registrationId/:documentType — URL lookup.
#[utoipa::path(
    get,
    path = "/api/documents/download/{registrationId}/{documentType}",
    params(
        ("registrationId" = String, Path, description = "Registration UUID"),
        ("documentType" = String, Path, description = "Slot to read"),
    ),
    responses(
        (status = 200, description = "Where to fetch the document", body = DownloadInfo),
        (status = 400, description = "Invalid document type", body = crate::error::ErrorBody),
        (status = 404, description = "Registration or document not found", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn download_document(
    State(state): State<AppState>,
    Path((raw_id, raw_type)): Path<(String, String)>,
) -> Result<Json<ApiResponse<DownloadInfo>>, AppError> {
    let kind = parse_document_type(&raw_type)?;
    let id = parse_registration_id(&raw_id)?;
    let record = state
        .registrations
        .get(&id)
        .ok_or_else(AppError::registration_not_found)?;
    let url = record
        .documents
        .url(kind)
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    Ok(Json(ApiResponse::data(DownloadInfo {
        document_type: kind.as_str().to_string(),
        download_url: url.to_string(),
    })))
}
