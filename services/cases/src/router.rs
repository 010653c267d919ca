use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use causelist_core::health::healthz;
use causelist_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    case::{create_case, delete_case, get_case, list_cases, update_case},
    dashboard::get_dashboard,
    document::{
        delete_document, favorite_document, get_document, grant_document_access,
        list_case_documents, unfavorite_document, upload_document,
    },
    event::{
        create_event, delete_event, get_event, list_events, respond_to_invitation, update_event,
    },
    user::{create_user, get_me, get_user, list_users},
};
use crate::state::AppState;

/// Readiness probe: ready once the database answers.
async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Cases
        .route("/cases", post(create_case))
        .route("/cases", get(list_cases))
        .route("/cases/{id}", get(get_case))
        .route("/cases/{id}", patch(update_case))
        .route("/cases/{id}", delete(delete_case))
        .route("/cases/{id}/documents", post(upload_document))
        .route("/cases/{id}/documents", get(list_case_documents))
        // Events
        .route("/events", post(create_event))
        .route("/events", get(list_events))
        .route("/events/{id}", get(get_event))
        .route("/events/{id}", patch(update_event))
        .route("/events/{id}", delete(delete_event))
        .route("/events/{id}/respond", post(respond_to_invitation))
        // Documents
        .route("/documents/{id}", get(get_document))
        .route("/documents/{id}", delete(delete_document))
        .route("/documents/{id}/access", post(grant_document_access))
        .route("/documents/{id}/favorite", post(favorite_document))
        .route("/documents/{id}/favorite", delete(unfavorite_document))
        // Users
        .route("/users", post(create_user))
        .route("/users", get(list_users))
        .route("/users/@me", get(get_me))
        .route("/users/{id}", get(get_user))
        // Dashboard
        .route("/dashboard", get(get_dashboard))
        .layer(
            tower::ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
