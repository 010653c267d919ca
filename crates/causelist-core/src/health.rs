use axum::http::StatusCode;

/// Handler for `GET /healthz`, the liveness check.
///
/// Readiness (`/readyz`) is service-local: each service wires its own
/// handler that probes the resources it depends on (database, etc.).
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
