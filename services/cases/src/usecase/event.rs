use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use causelist_domain::pagination::PageRequest;

use crate::domain::access::{Actor, can_update_case, can_update_event, can_view_event, case_scope};
use crate::domain::case::Case;
use crate::domain::event::{
    Event, EventListFilter, EventPriority, EventStatus, EventType, InvitationStatus, Participant,
};
use crate::domain::repository::{CaseRepository, EventRepository};
use crate::error::{CasesServiceError, FieldViolation};

pub struct ParticipantInput {
    pub user_id: Uuid,
    pub role: Option<String>,
}

impl ParticipantInput {
    fn into_participant(self, status: InvitationStatus) -> Participant {
        Participant {
            user_id: self.user_id,
            role: self
                .role
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| "attendee".to_owned()),
            invitation_status: status,
        }
    }
}

// ── CreateEvent ──────────────────────────────────────────────────────────────

pub struct CreateEventInput {
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub status: Option<EventStatus>,
    pub priority: Option<EventPriority>,
    pub start_time: DateTime<Utc>,
    /// Defaults to one hour after `start_time`.
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub case_id: Option<Uuid>,
    pub participants: Vec<ParticipantInput>,
}

/// Create a calendar event. Linking it to a case requires update rights on
/// that case and snapshots the case title/number onto the event.
pub struct CreateEventUseCase<E: EventRepository, C: CaseRepository> {
    pub events: E,
    pub cases: C,
}

impl<E: EventRepository, C: CaseRepository> CreateEventUseCase<E, C> {
    pub async fn execute(
        &self,
        actor: &Actor,
        input: CreateEventInput,
    ) -> Result<Event, CasesServiceError> {
        let owning_case = match input.case_id {
            Some(case_id) => {
                let case = self
                    .cases
                    .find_by_id(case_id)
                    .await?
                    .ok_or(CasesServiceError::CaseNotFound)?;
                if !can_update_case(actor, &case) {
                    return Err(CasesServiceError::Forbidden);
                }
                Some(case)
            }
            None => None,
        };
        let now = Utc::now();
        let event = Event {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description.filter(|d| !d.trim().is_empty()),
            event_type: input.event_type,
            status: input.status.unwrap_or(EventStatus::Scheduled),
            priority: input.priority.unwrap_or(EventPriority::Medium),
            start_time: input.start_time,
            end_time: input
                .end_time
                .unwrap_or(input.start_time + Duration::hours(1)),
            location: input.location.filter(|l| !l.trim().is_empty()),
            case_id: owning_case.as_ref().map(|c| c.id),
            case_title: owning_case.as_ref().map(|c| c.title.clone()),
            case_number: owning_case.as_ref().map(|c| c.case_number.clone()),
            participants: input
                .participants
                .into_iter()
                .map(|p| p.into_participant(InvitationStatus::Pending))
                .collect(),
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };
        let violations = event.validate();
        if !violations.is_empty() {
            return Err(CasesServiceError::Validation(violations));
        }
        self.events.create(&event).await?;
        Ok(event)
    }
}

// ── GetEvent ─────────────────────────────────────────────────────────────────

pub struct GetEventUseCase<E: EventRepository, C: CaseRepository> {
    pub events: E,
    pub cases: C,
}

impl<E: EventRepository, C: CaseRepository> GetEventUseCase<E, C> {
    pub async fn execute(&self, actor: &Actor, event_id: Uuid) -> Result<Event, CasesServiceError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(CasesServiceError::EventNotFound)?;
        let owning_case = self.owning_case(&event).await?;
        if !can_view_event(actor, &event, owning_case.as_ref()) {
            return Err(CasesServiceError::Forbidden);
        }
        Ok(event)
    }

    async fn owning_case(&self, event: &Event) -> Result<Option<Case>, CasesServiceError> {
        match event.case_id {
            Some(case_id) => self.cases.find_by_id(case_id).await,
            None => Ok(None),
        }
    }
}

// ── ListEvents ───────────────────────────────────────────────────────────────

pub struct ListEventsUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> ListEventsUseCase<E> {
    pub async fn execute(
        &self,
        actor: &Actor,
        filter: EventListFilter,
        page: PageRequest,
    ) -> Result<Vec<Event>, CasesServiceError> {
        let scope = case_scope(actor);
        self.events
            .list(actor.user_id, &scope, &filter, page.clamped())
            .await
    }
}

// ── UpdateEvent ──────────────────────────────────────────────────────────────

/// Partial update. A provided participant list replaces the stored one;
/// entries already on the event keep their invitation response, new entries
/// start pending.
#[derive(Default)]
pub struct UpdateEventInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<EventType>,
    pub status: Option<EventStatus>,
    pub priority: Option<EventPriority>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub participants: Option<Vec<ParticipantInput>>,
}

pub struct UpdateEventUseCase<E: EventRepository, C: CaseRepository> {
    pub events: E,
    pub cases: C,
}

impl<E: EventRepository, C: CaseRepository> UpdateEventUseCase<E, C> {
    pub async fn execute(
        &self,
        actor: &Actor,
        event_id: Uuid,
        input: UpdateEventInput,
    ) -> Result<Event, CasesServiceError> {
        let mut event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(CasesServiceError::EventNotFound)?;
        let owning_case = match event.case_id {
            Some(case_id) => self.cases.find_by_id(case_id).await?,
            None => None,
        };
        if !can_update_event(actor, &event, owning_case.as_ref()) {
            return Err(CasesServiceError::Forbidden);
        }

        if let Some(title) = input.title {
            event.title = title;
        }
        if let Some(description) = input.description {
            event.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(event_type) = input.event_type {
            event.event_type = event_type;
        }
        if let Some(status) = input.status {
            event.status = status;
        }
        if let Some(priority) = input.priority {
            event.priority = priority;
        }
        if let Some(start_time) = input.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = input.end_time {
            event.end_time = end_time;
        }
        if let Some(location) = input.location {
            event.location = Some(location).filter(|l| !l.trim().is_empty());
        }
        if let Some(list) = input.participants {
            let responses: HashMap<Uuid, InvitationStatus> = event
                .participants
                .iter()
                .map(|p| (p.user_id, p.invitation_status))
                .collect();
            event.participants = list
                .into_iter()
                .map(|p| {
                    let status = responses
                        .get(&p.user_id)
                        .copied()
                        .unwrap_or(InvitationStatus::Pending);
                    p.into_participant(status)
                })
                .collect();
        }

        let violations = event.validate();
        if !violations.is_empty() {
            return Err(CasesServiceError::Validation(violations));
        }
        event.updated_at = Utc::now();
        self.events.update(&event).await?;
        Ok(event)
    }
}

// ── DeleteEvent ──────────────────────────────────────────────────────────────

pub struct DeleteEventUseCase<E: EventRepository, C: CaseRepository> {
    pub events: E,
    pub cases: C,
}

impl<E: EventRepository, C: CaseRepository> DeleteEventUseCase<E, C> {
    pub async fn execute(&self, actor: &Actor, event_id: Uuid) -> Result<(), CasesServiceError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(CasesServiceError::EventNotFound)?;
        let owning_case = match event.case_id {
            Some(case_id) => self.cases.find_by_id(case_id).await?,
            None => None,
        };
        if !can_update_event(actor, &event, owning_case.as_ref()) {
            return Err(CasesServiceError::Forbidden);
        }
        if !self.events.delete(event_id).await? {
            return Err(CasesServiceError::EventNotFound);
        }
        Ok(())
    }
}

// ── RespondToInvitation ──────────────────────────────────────────────────────

/// Record a participant's accept/decline on their own invitation row.
pub struct RespondToInvitationUseCase<E: EventRepository> {
    pub events: E,
}

impl<E: EventRepository> RespondToInvitationUseCase<E> {
    pub async fn execute(
        &self,
        actor: &Actor,
        event_id: Uuid,
        response: InvitationStatus,
    ) -> Result<(), CasesServiceError> {
        if response == InvitationStatus::Pending {
            return Err(CasesServiceError::Validation(vec![FieldViolation::new(
                "status",
                "response must be accepted or declined",
            )]));
        }
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(CasesServiceError::EventNotFound)?;
        if !self
            .events
            .set_participant_status(event_id, actor.user_id, response)
            .await?
        {
            return Err(CasesServiceError::Forbidden);
        }
        Ok(())
    }
}
