use axum::{Json, extract::State};
use serde::Serialize;

use causelist_auth_types::identity::IdentityHeaders;

use crate::domain::access::Actor;
use crate::error::CasesServiceError;
use crate::handlers::event::EventResponse;
use crate::state::AppState;
use crate::usecase::dashboard::DashboardUseCase;

#[derive(Serialize)]
pub struct StatusCountResponse {
    pub status: &'static str,
    pub count: u64,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub status_counts: Vec<StatusCountResponse>,
    pub upcoming_hearings: Vec<EventResponse>,
}

// ── GET /dashboard ───────────────────────────────────────────────────────────

pub async fn get_dashboard(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = DashboardUseCase {
        cases: state.case_repo(),
        events: state.event_repo(),
    };
    let dashboard = usecase.execute(&actor).await?;
    Ok(Json(DashboardResponse {
        status_counts: dashboard
            .status_counts
            .into_iter()
            .map(|(status, count)| StatusCountResponse {
                status: status.as_str(),
                count,
            })
            .collect(),
        upcoming_hearings: dashboard
            .upcoming_hearings
            .into_iter()
            .map(Into::into)
            .collect(),
    }))
}
