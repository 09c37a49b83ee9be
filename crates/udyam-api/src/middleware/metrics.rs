//! Prometheus metrics.
//!
//! HTTP counters and latency histograms are recorded by a middleware on
//! every request. Domain gauges (registrations per status, stored
//! documents) are refreshed lazily when `/metrics` is scraped, so the
//! handlers never pay for bookkeeping.
//!
//! On by default; set `UDYAM_METRICS_ENABLED=0` to turn the endpoint and
//! middleware off.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
    TextEncoder,
};

use crate::state::AppState;

/// Whether the metrics endpoint and middleware should be wired up.
pub fn enabled_from_env() -> bool {
    std::env::var("UDYAM_METRICS_ENABLED")
        .map(|v| !matches!(v.trim(), "0" | "false" | "no" | "off"))
        .unwrap_or(true)
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,
    registrations_total: IntGaugeVec,
    documents_stored_total: IntGauge,
}

/// Handle to the metrics registry. Cheap to clone; lives in request
/// extensions for the middleware and in the `/metrics` handler.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

impl ApiMetrics {
    /// Build the registry and register every collector.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests served"),
            &["method", "path", "status"],
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
            ),
            &["method", "path"],
        )?;
        let http_errors_total = IntCounterVec::new(
            Opts::new("http_errors_total", "HTTP responses with 4xx/5xx status"),
            &["method", "path", "status"],
        )?;
        let registrations_total = IntGaugeVec::new(
            Opts::new("registrations_total", "Registrations currently stored, by status"),
            &["status"],
        )?;
        let documents_stored_total = IntGauge::new(
            "documents_stored_total",
            "Objects currently held by document storage",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_errors_total.clone()))?;
        registry.register(Box::new(registrations_total.clone()))?;
        registry.register(Box::new(documents_stored_total.clone()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                registrations_total,
                documents_stored_total,
            }),
        })
    }

    /// Record one completed request.
    pub fn record_request(&self, method: &str, path: &str, status: u16, elapsed_seconds: f64) {
        let status_label = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_label])
            .inc();
        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(elapsed_seconds);
        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_label])
                .inc();
        }
    }

    /// Refresh the domain gauges from the stores.
    pub fn refresh(&self, state: &AppState) {
        self.inner.registrations_total.reset();
        for (status, count) in state.registrations.status_counts() {
            self.inner
                .registrations_total
                .with_label_values(&[status.as_str()])
                .set(count as i64);
        }
        self.inner
            .documents_stored_total
            .set(state.documents.len() as i64);
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn gather_and_encode(&self) -> String {
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!(error = %err, "failed to encode metrics");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

/// Collapse identifier path segments so the label space stays bounded.
///
/// UUIDs become `{id}` and issued Udyam numbers become `{udyamNumber}`.
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if uuid::Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else if segment.starts_with("UDYAM-") {
                "{udyamNumber}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Record counters and latency for each request passing through.
///
/// Reads the [`ApiMetrics`] handle from request extensions; when absent
/// (metrics disabled) the request passes straight through.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    let start = Instant::now();
    let response = next.run(request).await;

    if let Some(metrics) = metrics {
        metrics.record_request(
            &method,
            &path,
            response.status().as_u16(),
            start.elapsed().as_secs_f64(),
        );
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_identifiers() {
        assert_eq!(
            normalize_path("/api/registration/0e9b20c7-39a6-4f0f-9b5e-6a1f9a1d2c3b"),
            "/api/registration/{id}"
        );
        assert_eq!(
            normalize_path("/api/registration/udyam/UDYAM-07-11-0000123"),
            "/api/registration/udyam/{udyamNumber}"
        );
        assert_eq!(normalize_path("/api/health"), "/api/health");
    }

    #[test]
    fn exposition_contains_recorded_series() {
        let metrics = ApiMetrics::new().unwrap();
        metrics.record_request("GET", "/api/registration", 200, 0.012);
        metrics.record_request("POST", "/api/registration", 400, 0.003);

        let text = metrics.gather_and_encode();
        assert!(text.contains("http_requests_total"));
        assert!(text.contains("http_errors_total"));
        assert!(text.contains("http_request_duration_seconds"));
    }

    #[test]
    fn refresh_reflects_store_contents() {
        let metrics = ApiMetrics::new().unwrap();
        let state = AppState::new();
        metrics.refresh(&state);
        let text = metrics.gather_and_encode();
        assert!(text.contains("documents_stored_total 0"));
    }
}
