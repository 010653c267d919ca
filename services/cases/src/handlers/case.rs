use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use causelist_auth_types::identity::IdentityHeaders;

use crate::domain::access::Actor;
use crate::domain::case::{
    Advocate, Assignment, Case, CaseListFilter, CaseStatus, CaseSummary, Parties, Party,
    Stakeholder,
};
use crate::error::{CasesServiceError, FieldViolation};
use crate::state::AppState;
use crate::usecase::case::{
    CreateCaseInput, CreateCaseUseCase, DeleteCaseUseCase, GetCaseUseCase, ListCasesUseCase,
    UpdateCaseInput, UpdateCaseUseCase,
};
use crate::usecase::hearing_sync::SyncHearingEventUseCase;
use crate::usecase::notify::NotifyCaseCreatedUseCase;

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignmentPayload {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl From<AssignmentPayload> for Assignment {
    fn from(p: AssignmentPayload) -> Self {
        Assignment {
            user_id: p.user_id,
            name: p.name,
            email: p.email,
            phone: p.phone,
            role: p.role,
            position: 0,
            is_primary: p.is_primary,
        }
    }
}

#[derive(Deserialize)]
pub struct PartyPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl From<PartyPayload> for Party {
    fn from(p: PartyPayload) -> Self {
        Party {
            name: p.name,
            entity_type: p.entity_type,
            role: p.role,
            email: p.email,
            phone: p.phone,
            address: p.address,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct PartiesPayload {
    #[serde(default)]
    pub petitioner: Vec<PartyPayload>,
    #[serde(default)]
    pub respondent: Vec<PartyPayload>,
}

impl From<PartiesPayload> for Parties {
    fn from(p: PartiesPayload) -> Self {
        Parties {
            petitioner: p.petitioner.into_iter().map(Into::into).collect(),
            respondent: p.respondent.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Deserialize)]
pub struct AdvocatePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl From<AdvocatePayload> for Advocate {
    fn from(p: AdvocatePayload) -> Self {
        Advocate {
            name: p.name,
            email: p.email,
            phone: p.phone,
            position: 0,
        }
    }
}

#[derive(Deserialize)]
pub struct StakeholderPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl From<StakeholderPayload> for Stakeholder {
    fn from(p: StakeholderPayload) -> Self {
        Stakeholder {
            name: p.name,
            role: p.role,
            email: p.email,
            phone: p.phone,
            position: 0,
        }
    }
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AssignmentResponse {
    pub user_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub position: i32,
    pub is_primary: bool,
}

impl From<Assignment> for AssignmentResponse {
    fn from(a: Assignment) -> Self {
        AssignmentResponse {
            user_id: a.user_id.map(|id| id.to_string()),
            name: a.name,
            email: a.email,
            phone: a.phone,
            role: a.role,
            position: a.position,
            is_primary: a.is_primary,
        }
    }
}

#[derive(Serialize)]
pub struct PartyResponse {
    pub name: String,
    pub entity_type: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<Party> for PartyResponse {
    fn from(p: Party) -> Self {
        PartyResponse {
            name: p.name,
            entity_type: p.entity_type,
            role: p.role,
            email: p.email,
            phone: p.phone,
            address: p.address,
        }
    }
}

#[derive(Serialize)]
pub struct PartiesResponse {
    pub petitioner: Vec<PartyResponse>,
    pub respondent: Vec<PartyResponse>,
}

#[derive(Serialize)]
pub struct AdvocateResponse {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: i32,
}

#[derive(Serialize)]
pub struct StakeholderResponse {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub position: i32,
}

#[derive(Serialize)]
pub struct CaseResponse {
    pub id: String,
    pub title: String,
    pub case_number: String,
    pub case_type: String,
    pub status: &'static str,
    pub court: Option<String>,
    pub description: Option<String>,
    pub is_urgent: bool,
    pub filing_date: chrono::NaiveDate,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub hearing_date: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms_opt")]
    pub next_hearing_date: Option<chrono::DateTime<chrono::Utc>>,
    pub lawyer_id: Option<String>,
    pub client_id: Option<String>,
    pub lawyers: Vec<AssignmentResponse>,
    pub clients: Vec<AssignmentResponse>,
    pub parties: PartiesResponse,
    pub advocates: Vec<AdvocateResponse>,
    pub stakeholders: Vec<StakeholderResponse>,
    pub created_by: String,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Case> for CaseResponse {
    fn from(case: Case) -> Self {
        CaseResponse {
            id: case.id.to_string(),
            title: case.title,
            case_number: case.case_number,
            case_type: case.case_type,
            status: case.status.as_str(),
            court: case.court,
            description: case.description,
            is_urgent: case.is_urgent,
            filing_date: case.filing_date,
            hearing_date: case.hearing_date,
            next_hearing_date: case.next_hearing_date,
            lawyer_id: case.lawyer_id.map(|id| id.to_string()),
            client_id: case.client_id.map(|id| id.to_string()),
            lawyers: case.lawyers.into_iter().map(Into::into).collect(),
            clients: case.clients.into_iter().map(Into::into).collect(),
            parties: PartiesResponse {
                petitioner: case.parties.petitioner.into_iter().map(Into::into).collect(),
                respondent: case.parties.respondent.into_iter().map(Into::into).collect(),
            },
            advocates: case
                .advocates
                .into_iter()
                .map(|a| AdvocateResponse {
                    name: a.name,
                    email: a.email,
                    phone: a.phone,
                    position: a.position,
                })
                .collect(),
            stakeholders: case
                .stakeholders
                .into_iter()
                .map(|s| StakeholderResponse {
                    name: s.name,
                    role: s.role,
                    email: s.email,
                    phone: s.phone,
                    position: s.position,
                })
                .collect(),
            created_by: case.created_by.to_string(),
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CaseSummaryResponse {
    pub id: String,
    pub title: String,
    pub case_number: String,
    pub case_type: String,
    pub status: &'static str,
    pub court: Option<String>,
    pub is_urgent: bool,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms_opt")]
    pub next_hearing_date: Option<chrono::DateTime<chrono::Utc>>,
    pub lawyer_id: Option<String>,
    pub client_id: Option<String>,
    pub created_by: String,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CaseSummary> for CaseSummaryResponse {
    fn from(s: CaseSummary) -> Self {
        CaseSummaryResponse {
            id: s.id.to_string(),
            title: s.title,
            case_number: s.case_number,
            case_type: s.case_type,
            status: s.status.as_str(),
            court: s.court,
            is_urgent: s.is_urgent,
            next_hearing_date: s.next_hearing_date,
            lawyer_id: s.lawyer_id.map(|id| id.to_string()),
            client_id: s.client_id.map(|id| id.to_string()),
            created_by: s.created_by.to_string(),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn parse_status(value: &str) -> Result<CaseStatus, CasesServiceError> {
    CaseStatus::parse(value).ok_or_else(|| {
        CasesServiceError::Validation(vec![FieldViolation::new(
            "status",
            format!("unknown status `{value}`"),
        )])
    })
}

/// Run the hearing-event synchronizer and the case-created fan-out off the
/// request path. Failures are logged with case context, never surfaced.
fn spawn_after_write(state: &AppState, case: &Case, sync_hearing: bool, notify_created: bool) {
    let state = state.clone();
    let case = case.clone();
    tokio::spawn(async move {
        if sync_hearing {
            let sync = SyncHearingEventUseCase {
                events: state.event_repo(),
            };
            if let Err(e) = sync.execute(&case).await {
                tracing::error!(error = %e, case_id = %case.id, "hearing event sync failed");
            }
        }
        if notify_created {
            let fanout = NotifyCaseCreatedUseCase {
                notifier: state.notifier.clone(),
            };
            fanout.execute(&case).await;
        }
    });
}

// ── POST /cases ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCaseRequest {
    pub title: String,
    pub case_number: Option<String>,
    pub case_type: String,
    pub status: Option<String>,
    pub court: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_urgent: bool,
    pub filing_date: Option<chrono::NaiveDate>,
    pub hearing_date: Option<chrono::DateTime<chrono::Utc>>,
    pub next_hearing_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub lawyers: Vec<AssignmentPayload>,
    #[serde(default)]
    pub clients: Vec<AssignmentPayload>,
    #[serde(default)]
    pub parties: PartiesPayload,
    #[serde(default)]
    pub advocates: Vec<AdvocatePayload>,
    #[serde(default)]
    pub stakeholders: Vec<StakeholderPayload>,
}

pub async fn create_case(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<CaseResponse>), CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let status = body.status.as_deref().map(parse_status).transpose()?;
    let usecase = CreateCaseUseCase {
        cases: state.case_repo(),
        users: state.user_repo(),
    };
    let outcome = usecase
        .execute(
            &actor,
            CreateCaseInput {
                title: body.title,
                case_number: body.case_number,
                case_type: body.case_type,
                status,
                court: body.court,
                description: body.description,
                is_urgent: body.is_urgent,
                filing_date: body.filing_date,
                hearing_date: body.hearing_date,
                next_hearing_date: body.next_hearing_date,
                lawyers: body.lawyers.into_iter().map(Into::into).collect(),
                clients: body.clients.into_iter().map(Into::into).collect(),
                parties: body.parties.into(),
                advocates: body.advocates.into_iter().map(Into::into).collect(),
                stakeholders: body.stakeholders.into_iter().map(Into::into).collect(),
            },
        )
        .await?;
    spawn_after_write(&state, &outcome.case, outcome.hearing_date_changed, true);
    Ok((StatusCode::CREATED, Json(CaseResponse::from(outcome.case))))
}

// ── GET /cases ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CaseListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<String>,
    pub case_type: Option<String>,
    pub is_urgent: Option<bool>,
    pub q: Option<String>,
}

pub async fn list_cases(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<CaseListQuery>,
) -> Result<Json<Vec<CaseSummaryResponse>>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let filter = CaseListFilter {
        status,
        case_type: query.case_type,
        is_urgent: query.is_urgent,
        q: query.q,
    };
    let page = super::page_request(query.per_page, query.page);
    let usecase = ListCasesUseCase {
        cases: state.case_repo(),
    };
    let summaries = usecase.execute(&actor, filter, page).await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

// ── GET /cases/{id} ──────────────────────────────────────────────────────────

pub async fn get_case(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<CaseResponse>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = GetCaseUseCase {
        cases: state.case_repo(),
    };
    let case = usecase.execute(&actor, case_id).await?;
    Ok(Json(CaseResponse::from(case)))
}

// ── PATCH /cases/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateCaseRequest {
    pub title: Option<String>,
    pub case_number: Option<String>,
    pub case_type: Option<String>,
    pub status: Option<String>,
    pub court: Option<String>,
    pub description: Option<String>,
    pub is_urgent: Option<bool>,
    pub filing_date: Option<chrono::NaiveDate>,
    pub hearing_date: Option<chrono::DateTime<chrono::Utc>>,
    pub next_hearing_date: Option<chrono::DateTime<chrono::Utc>>,
    pub lawyers: Option<Vec<AssignmentPayload>>,
    pub clients: Option<Vec<AssignmentPayload>>,
    pub parties: Option<PartiesPayload>,
    pub advocates: Option<Vec<AdvocatePayload>>,
    pub stakeholders: Option<Vec<StakeholderPayload>>,
}

pub async fn update_case(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
    Json(body): Json<UpdateCaseRequest>,
) -> Result<StatusCode, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let status = body.status.as_deref().map(parse_status).transpose()?;
    let usecase = UpdateCaseUseCase {
        cases: state.case_repo(),
    };
    let outcome = usecase
        .execute(
            &actor,
            case_id,
            UpdateCaseInput {
                title: body.title,
                case_number: body.case_number,
                case_type: body.case_type,
                status,
                court: body.court,
                description: body.description,
                is_urgent: body.is_urgent,
                filing_date: body.filing_date,
                hearing_date: body.hearing_date,
                next_hearing_date: body.next_hearing_date,
                lawyers: body.lawyers.map(|l| l.into_iter().map(Into::into).collect()),
                clients: body.clients.map(|c| c.into_iter().map(Into::into).collect()),
                parties: body.parties.map(Into::into),
                advocates: body.advocates.map(|a| a.into_iter().map(Into::into).collect()),
                stakeholders: body
                    .stakeholders
                    .map(|s| s.into_iter().map(Into::into).collect()),
            },
        )
        .await?;
    if outcome.hearing_date_changed {
        spawn_after_write(&state, &outcome.case, true, false);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /cases/{id} ───────────────────────────────────────────────────────

pub async fn delete_case(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> Result<StatusCode, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = DeleteCaseUseCase {
        cases: state.case_repo(),
    };
    usecase.execute(&actor, case_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
