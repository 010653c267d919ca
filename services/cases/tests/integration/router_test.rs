use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use causelist_cases::config::BlobConfig;
use causelist_cases::infra::blob::S3BlobStore;
use causelist_cases::infra::notify::HttpNotifier;
use causelist_cases::router::build_router;
use causelist_cases::state::AppState;

/// A server with a disconnected database. Good enough for everything the
/// router decides before touching storage.
fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        notifier: HttpNotifier::new(None, None),
        blobs: S3BlobStore::new(&BlobConfig {
            endpoint: "http://127.0.0.1:9000".to_owned(),
            access_key: "test".to_owned(),
            secret_key: "test".to_owned(),
            region: "us-east-1".to_owned(),
            bucket: "case-documents".to_owned(),
        }),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn as_role(request: TestRequest, user_id: Uuid, role: &'static str) -> TestRequest {
    request
        .add_header(
            HeaderName::from_static("x-causelist-user-id"),
            HeaderValue::from_str(&user_id.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-causelist-user-role"),
            HeaderValue::from_static(role),
        )
}

#[tokio::test]
async fn should_answer_healthz() {
    let server = test_server();
    server.get("/healthz").await.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_fail_readiness_without_database() {
    let server = test_server();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_reject_anonymous_requests() {
    let server = test_server();
    server
        .get("/cases")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_unknown_role() {
    let server = test_server();
    as_role(server.get("/cases"), Uuid::now_v7(), "paralegal")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_malformed_case_id() {
    let server = test_server();
    as_role(server.get("/cases/not-a-uuid"), Uuid::now_v7(), "client")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_forbid_user_creation_by_non_admin() {
    let server = test_server();
    let request = server.post("/users").json(&serde_json::json!({
        "name": "Rohan Mehta",
        "email": "rohan@example.com",
        "role": "client",
    }));
    as_role(request, Uuid::now_v7(), "client")
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
