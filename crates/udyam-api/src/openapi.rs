//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI spec, served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Udyam Registration API",
        version = "1.0.0",
        description = "Demo MSME (Udyam) registration service.\n\nProvides:\n- **Registration** CRUD with a draft → submitted → under_review → approved/rejected review lifecycle and Udyam number issuance on approval\n- **Document** upload (single and batch), listing, download pointers, and deletion against typed slots\n- **Health** probes for the process and the optional PostgreSQL backing store\n\nAll responses share the `{success, message?, data?, errors?}` envelope.\nNo authentication: this is a demonstration surface."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Registrations ────────────────────────────────────────────
        crate::routes::registration::create_registration,
        crate::routes::registration::list_registrations,
        crate::routes::registration::get_registration,
        crate::routes::registration::get_by_udyam,
        crate::routes::registration::update_registration,
        crate::routes::registration::delete_registration,
        crate::routes::registration::submit_registration,
        crate::routes::registration::approve_registration,
        crate::routes::registration::reject_registration,
        // ── Documents ────────────────────────────────────────────────
        crate::routes::documents::upload_document,
        crate::routes::documents::upload_multiple,
        crate::routes::documents::list_documents,
        crate::routes::documents::delete_document,
        crate::routes::documents::download_document,
        // ── Health ───────────────────────────────────────────────────
        crate::routes::health::health,
        crate::routes::health::database_health,
    ),
    components(
        schemas(
            // ── Domain model ─────────────────────────────────────────
            udyam_state::Registration,
            udyam_state::RegistrationStatus,
            udyam_state::ReviewEvidence,
            udyam_state::RegistrationInput,
            udyam_state::Documents,
            udyam_state::DocumentType,
            // ── Envelope and error types ─────────────────────────────
            crate::error::ErrorBody,
            // ── Route DTOs ───────────────────────────────────────────
            crate::routes::registration::RegistrationView,
            crate::routes::registration::Pagination,
            crate::routes::registration::RegistrationListData,
            crate::routes::documents::UploadedDocument,
            crate::routes::documents::DownloadInfo,
            crate::routes::health::HealthData,
            crate::routes::health::DatabaseHealthData,
        ),
    ),
    tags(
        (name = "registration", description = "Registration CRUD and the review lifecycle"),
        (name = "documents", description = "Supporting document upload, download, and deletion"),
        (name = "health", description = "Liveness and database connectivity probes"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router, serving the spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_generates_with_expected_info() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Udyam Registration API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn spec_covers_the_route_surface() {
        let spec = ApiDoc::openapi();
        for path in [
            "/api/registration",
            "/api/registration/{id}",
            "/api/registration/udyam/{udyamNumber}",
            "/api/registration/{id}/submit",
            "/api/registration/{id}/approve",
            "/api/registration/{id}/reject",
            "/api/documents/upload/{registrationId}",
            "/api/documents/upload-multiple/{registrationId}",
            "/api/documents/{registrationId}",
            "/api/documents/{registrationId}/{documentType}",
            "/api/documents/download/{registrationId}/{documentType}",
            "/api/health",
            "/api/health/database",
        ] {
            assert!(
                spec.paths.paths.contains_key(path),
                "spec should document {path}"
            );
        }
    }

    #[test]
    fn spec_has_schema_components() {
        let spec = ApiDoc::openapi();
        let schemas = &spec.components.as_ref().unwrap().schemas;
        for name in [
            "Registration",
            "RegistrationInput",
            "RegistrationView",
            "Documents",
            "ErrorBody",
            "Pagination",
        ] {
            assert!(schemas.contains_key(name), "should contain {name} schema");
        }
    }

    #[test]
    fn spec_serializes_to_json() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("openapi"));
        assert!(json.contains("Udyam Registration API"));
    }

    #[test]
    fn router_builds() {
        let _router = router();
    }
}
