use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::case::Case;
use crate::error::FieldViolation;

/// Event kind, stored as text. `Hearing` is distinguished: the derived
/// synchronizer only ever creates and reconciles hearing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Hearing,
    Filing,
    Meeting,
    Deposition,
    Other,
}

impl EventType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hearing" => Some(Self::Hearing),
            "filing" => Some(Self::Filing),
            "meeting" => Some(Self::Meeting),
            "deposition" => Some(Self::Deposition),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hearing => "hearing",
            Self::Filing => "filing",
            Self::Meeting => "meeting",
            Self::Deposition => "deposition",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Scheduled,
    Completed,
    Cancelled,
    Postponed,
}

impl EventStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "postponed" => Some(Self::Postponed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Postponed => "postponed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPriority {
    Low,
    Medium,
    High,
}

impl EventPriority {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

/// Invited participant on an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub user_id: Uuid,
    pub role: String,
    pub invitation_status: InvitationStatus,
}

/// Calendar event. `case_title`/`case_number` are a snapshot taken when the
/// event is linked to a case; they are not kept in sync with later renames.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub status: EventStatus,
    pub priority: EventPriority,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub case_id: Option<Uuid>,
    pub case_title: Option<String>,
    pub case_number: Option<String>,
    pub participants: Vec<Participant>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Field-level validation: the end must be strictly after the start.
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.title.trim().is_empty() {
            violations.push(FieldViolation::new("title", "title is required"));
        }
        if self.end_time <= self.start_time {
            violations.push(FieldViolation::new(
                "end_time",
                "end must be strictly after start",
            ));
        }
        violations
    }

    /// Build the hearing event mirroring a case's `next_hearing_date`.
    /// One hour long, scheduled, titled after the case, located at the
    /// case's court (or "Court"), high priority when the case is urgent.
    pub fn hearing_for_case(case: &Case, start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: hearing_title(&case.title),
            description: Some(format!("Hearing for case {}", case.case_number)),
            event_type: EventType::Hearing,
            status: EventStatus::Scheduled,
            priority: if case.is_urgent {
                EventPriority::High
            } else {
                EventPriority::Medium
            },
            start_time: start,
            end_time: start + Duration::hours(1),
            location: Some(
                case.court
                    .clone()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| "Court".to_owned()),
            ),
            case_id: Some(case.id),
            case_title: Some(case.title.clone()),
            case_number: Some(case.case_number.clone()),
            participants: Vec::new(),
            created_by: case.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move an existing hearing event to a new `next_hearing_date`.
    /// Re-derives the title, description, and case snapshot from the case;
    /// everything else (participants, status, location) is left alone.
    pub fn reschedule_hearing(&mut self, case: &Case, start: DateTime<Utc>, now: DateTime<Utc>) {
        self.title = hearing_title(&case.title);
        self.description = Some(format!("Hearing for case {}", case.case_number));
        self.case_title = Some(case.title.clone());
        self.case_number = Some(case.case_number.clone());
        self.start_time = start;
        self.end_time = start + Duration::hours(1);
        self.updated_at = now;
    }
}

fn hearing_title(case_title: &str) -> String {
    format!("Hearing: {case_title}")
}

/// Optional filters for event list queries, applied inside the viewer's scope.
#[derive(Debug, Clone, Default)]
pub struct EventListFilter {
    pub case_id: Option<Uuid>,
    /// Inclusive lower bound on `start_time`.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `start_time`.
    pub to: Option<DateTime<Utc>>,
    pub event_type: Option<EventType>,
}
