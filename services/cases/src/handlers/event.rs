use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use causelist_auth_types::identity::IdentityHeaders;

use crate::domain::access::Actor;
use crate::domain::event::{
    Event, EventListFilter, EventPriority, EventStatus, EventType, InvitationStatus,
};
use crate::error::{CasesServiceError, FieldViolation};
use crate::state::AppState;
use crate::usecase::event::{
    CreateEventInput, CreateEventUseCase, DeleteEventUseCase, GetEventUseCase, ListEventsUseCase,
    ParticipantInput, RespondToInvitationUseCase, UpdateEventInput, UpdateEventUseCase,
};

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ParticipantPayload {
    pub user_id: Uuid,
    pub role: Option<String>,
}

impl From<ParticipantPayload> for ParticipantInput {
    fn from(p: ParticipantPayload) -> Self {
        ParticipantInput {
            user_id: p.user_id,
            role: p.role,
        }
    }
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ParticipantResponse {
    pub user_id: String,
    pub role: String,
    pub invitation_status: &'static str,
}

#[derive(Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_type: &'static str,
    pub status: &'static str,
    pub priority: &'static str,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub start_time: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub end_time: chrono::DateTime<chrono::Utc>,
    pub location: Option<String>,
    pub case_id: Option<String>,
    pub case_title: Option<String>,
    pub case_number: Option<String>,
    pub participants: Vec<ParticipantResponse>,
    pub created_by: String,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "causelist_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        EventResponse {
            id: event.id.to_string(),
            title: event.title,
            description: event.description,
            event_type: event.event_type.as_str(),
            status: event.status.as_str(),
            priority: event.priority.as_str(),
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location,
            case_id: event.case_id.map(|id| id.to_string()),
            case_title: event.case_title,
            case_number: event.case_number,
            participants: event
                .participants
                .into_iter()
                .map(|p| ParticipantResponse {
                    user_id: p.user_id.to_string(),
                    role: p.role,
                    invitation_status: p.invitation_status.as_str(),
                })
                .collect(),
            created_by: event.created_by.to_string(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn parse_event_type(value: &str) -> Result<EventType, CasesServiceError> {
    EventType::parse(value).ok_or_else(|| {
        CasesServiceError::Validation(vec![FieldViolation::new(
            "event_type",
            format!("unknown event type `{value}`"),
        )])
    })
}

fn parse_event_status(value: &str) -> Result<EventStatus, CasesServiceError> {
    EventStatus::parse(value).ok_or_else(|| {
        CasesServiceError::Validation(vec![FieldViolation::new(
            "status",
            format!("unknown status `{value}`"),
        )])
    })
}

fn parse_priority(value: &str) -> Result<EventPriority, CasesServiceError> {
    EventPriority::parse(value).ok_or_else(|| {
        CasesServiceError::Validation(vec![FieldViolation::new(
            "priority",
            format!("unknown priority `{value}`"),
        )])
    })
}

fn parse_response(value: &str) -> Result<InvitationStatus, CasesServiceError> {
    InvitationStatus::parse(value).ok_or_else(|| {
        CasesServiceError::Validation(vec![FieldViolation::new(
            "status",
            format!("unknown response `{value}`"),
        )])
    })
}

// ── POST /events ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_type: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub location: Option<String>,
    pub case_id: Option<Uuid>,
    #[serde(default)]
    pub participants: Vec<ParticipantPayload>,
}

pub async fn create_event(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let event_type = parse_event_type(&body.event_type)?;
    let status = body.status.as_deref().map(parse_event_status).transpose()?;
    let priority = body.priority.as_deref().map(parse_priority).transpose()?;
    let usecase = CreateEventUseCase {
        events: state.event_repo(),
        cases: state.case_repo(),
    };
    let event = usecase
        .execute(
            &actor,
            CreateEventInput {
                title: body.title,
                description: body.description,
                event_type,
                status,
                priority,
                start_time: body.start_time,
                end_time: body.end_time,
                location: body.location,
                case_id: body.case_id,
                participants: body.participants.into_iter().map(Into::into).collect(),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

// ── GET /events ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct EventListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub case_id: Option<Uuid>,
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    pub event_type: Option<String>,
}

pub async fn list_events(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<Vec<EventResponse>>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let event_type = query
        .event_type
        .as_deref()
        .map(parse_event_type)
        .transpose()?;
    let filter = EventListFilter {
        case_id: query.case_id,
        from: query.from,
        to: query.to,
        event_type,
    };
    let page = super::page_request(query.per_page, query.page);
    let usecase = ListEventsUseCase {
        events: state.event_repo(),
    };
    let events = usecase.execute(&actor, filter, page).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

// ── GET /events/{id} ─────────────────────────────────────────────────────────

pub async fn get_event(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventResponse>, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = GetEventUseCase {
        events: state.event_repo(),
        cases: state.case_repo(),
    };
    let event = usecase.execute(&actor, event_id).await?;
    Ok(Json(EventResponse::from(event)))
}

// ── PATCH /events/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub location: Option<String>,
    pub participants: Option<Vec<ParticipantPayload>>,
}

pub async fn update_event(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<StatusCode, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let event_type = body.event_type.as_deref().map(parse_event_type).transpose()?;
    let status = body.status.as_deref().map(parse_event_status).transpose()?;
    let priority = body.priority.as_deref().map(parse_priority).transpose()?;
    let usecase = UpdateEventUseCase {
        events: state.event_repo(),
        cases: state.case_repo(),
    };
    usecase
        .execute(
            &actor,
            event_id,
            UpdateEventInput {
                title: body.title,
                description: body.description,
                event_type,
                status,
                priority,
                start_time: body.start_time,
                end_time: body.end_time,
                location: body.location,
                participants: body
                    .participants
                    .map(|p| p.into_iter().map(Into::into).collect()),
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /events/{id} ──────────────────────────────────────────────────────

pub async fn delete_event(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let usecase = DeleteEventUseCase {
        events: state.event_repo(),
        cases: state.case_repo(),
    };
    usecase.execute(&actor, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /events/{id}/respond ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RespondRequest {
    pub status: String,
}

pub async fn respond_to_invitation(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(body): Json<RespondRequest>,
) -> Result<StatusCode, CasesServiceError> {
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.role,
    };
    let response = parse_response(&body.status)?;
    let usecase = RespondToInvitationUseCase {
        events: state.event_repo(),
    };
    usecase.execute(&actor, event_id, response).await?;
    Ok(StatusCode::NO_CONTENT)
}
