//! # udyam-api — HTTP API for the Udyam registration portal
//!
//! Axum service exposing the portal's REST surface on top of
//! [`udyam_core`] and [`udyam_state`].
//!
//! ## API Surface
//!
//! | Prefix                  | Module                   | Domain                       |
//! |-------------------------|--------------------------|------------------------------|
//! | `/api/registration/*`   | [`routes::registration`] | Registration CRUD, lifecycle |
//! | `/api/documents/*`      | [`routes::documents`]    | Document upload/download     |
//! | `/api/health/*`         | [`routes::health`]       | Liveness, database probe     |
//! | `/openapi.json`         | [`openapi`]              | Generated OpenAPI spec       |
//! | `/metrics`              | [`middleware::metrics`]  | Prometheus exposition        |
//! | `/`                     | service banner           |                              |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! Health probes, `/metrics`, and the banner sit outside the metrics
//! middleware so scrapes and liveness checks stay out of the counters.

pub mod db;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;
pub mod storage;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::{self, HeaderName};
use axum::http::{Method, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::{self, ApiMetrics};
use crate::state::AppState;

/// Body limit sized for the five-file batch upload at the 5 MB per-file
/// cap, plus multipart framing.
const MAX_BODY_BYTES: usize = 30 * 1024 * 1024;

/// The portal's permissive CORS policy: any origin, its method and
/// header lists.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            HeaderName::from_static("accept-version"),
            header::CONTENT_LENGTH,
            HeaderName::from_static("content-md5"),
            header::CONTENT_TYPE,
            header::DATE,
            HeaderName::from_static("x-api-version"),
        ])
}

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics_on = metrics::enabled_from_env();
    let metrics = if metrics_on {
        match ApiMetrics::new() {
            Ok(metrics) => Some(metrics),
            Err(e) => {
                tracing::error!(error = %e, "failed to build metrics registry; metrics disabled");
                None
            }
        }
    } else {
        None
    };

    let mut api = Router::new()
        .merge(routes::registration::router())
        .merge(routes::documents::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    if let Some(metrics) = &metrics {
        api = api
            .layer(from_fn(metrics::metrics_middleware))
            .layer(Extension(metrics.clone()));
    }
    let api = api.layer(TraceLayer::new_for_http()).with_state(state.clone());

    // Banner, health, and the scrape endpoint bypass the request counters.
    let mut open = Router::new()
        .route("/", get(banner))
        .merge(routes::health::router());
    if let Some(metrics) = metrics {
        open = open
            .route("/metrics", get(prometheus_metrics))
            .layer(Extension(metrics));
    }
    let open = open.with_state(state);

    Router::new().merge(open).merge(api).layer(cors_layer())
}

/// GET / — Service banner.
async fn banner() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Udyam Registration API",
        "version": "1.0.0",
        "status": "running",
        "timestamp": Utc::now(),
        "endpoints": {
            "registrations": "/api/registration",
            "documents": "/api/documents",
            "health": "/api/health"
        }
    }))
}

/// GET /metrics — Prometheus scrape endpoint.
///
/// Refreshes the domain gauges from `AppState` on each scrape (pull
/// model), then encodes the registry in text exposition format.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    metrics.refresh(&state);
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics.gather_and_encode(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn banner_names_the_service_and_endpoints() {
        let app = app(AppState::new());
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["message"], "Udyam Registration API");
        assert_eq!(body["status"], "running");
        assert_eq!(body["endpoints"]["registrations"], "/api/registration");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let app = app(AppState::new());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("origin", "https://udyam.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn app_serves_registration_and_health_routes() {
        let app = app(AppState::new());

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/registration")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_spec_is_served() {
        let app = app(AppState::new());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["info"]["title"], "Udyam Registration API");
    }
}
