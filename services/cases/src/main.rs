use sea_orm::Database;
use tracing::info;

use causelist_cases::config::CasesConfig;
use causelist_cases::infra::blob::S3BlobStore;
use causelist_cases::infra::notify::HttpNotifier;
use causelist_cases::router::build_router;
use causelist_cases::state::AppState;

#[tokio::main]
async fn main() {
    causelist_core::tracing::init_tracing();

    let config = CasesConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let blobs = S3BlobStore::new(&config.blob);
    blobs.ensure_bucket().await;

    let state = AppState {
        db,
        notifier: HttpNotifier::new(config.mailgun, config.twilio),
        blobs,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.cases_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("cases service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
