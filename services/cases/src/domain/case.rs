use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::user::User;
use crate::error::FieldViolation;

/// Case lifecycle status, stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    Draft,
    Active,
    Inactive,
    Closed,
    Archived,
    Pending,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 6] = [
        CaseStatus::Draft,
        CaseStatus::Active,
        CaseStatus::Inactive,
        CaseStatus::Closed,
        CaseStatus::Archived,
        CaseStatus::Pending,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "closed" => Some(Self::Closed),
            "archived" => Some(Self::Archived),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Closed => "closed",
            Self::Archived => "archived",
            Self::Pending => "pending",
        }
    }
}

/// Which side of the case a party stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartySide {
    Petitioner,
    Respondent,
}

impl PartySide {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "petitioner" => Some(Self::Petitioner),
            "respondent" => Some(Self::Respondent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petitioner => "petitioner",
            Self::Respondent => "respondent",
        }
    }

    /// Role labels a party on this side may carry.
    pub fn allowed_roles(&self) -> &'static [&'static str] {
        match self {
            Self::Petitioner => &["Petitioner", "Appellant", "Plaintiff", "Complainant"],
            Self::Respondent => &["Respondent", "Accused", "Defendant", "Opponent"],
        }
    }

    /// Default role label for a party on this side.
    pub fn default_role(&self) -> &'static str {
        match self {
            Self::Petitioner => "Petitioner",
            Self::Respondent => "Respondent",
        }
    }
}

const ENTITY_TYPES: [&str; 2] = ["individual", "organization"];

/// A named party on one side of a case. Contact fields are plain strings
/// defaulted to `""` so every entry reads back uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    pub name: String,
    pub entity_type: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Both party sides of a case. The two `Vec`s make "parties is always an
/// array" true by construction; an absent side is simply empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parties {
    pub petitioner: Vec<Party>,
    pub respondent: Vec<Party>,
}

impl Parties {
    /// Fill side-dependent defaults on every entry: `entity_type` falls back
    /// to `individual`, an empty `role` becomes the side's default label.
    pub fn normalize(&mut self) {
        for party in &mut self.petitioner {
            normalize_party(party, PartySide::Petitioner);
        }
        for party in &mut self.respondent {
            normalize_party(party, PartySide::Respondent);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.petitioner.is_empty() && self.respondent.is_empty()
    }
}

fn normalize_party(party: &mut Party, side: PartySide) {
    if party.entity_type.trim().is_empty() {
        party.entity_type = "individual".to_owned();
    }
    if party.role.trim().is_empty() {
        party.role = side.default_role().to_owned();
    }
}

/// Lawyer or client assignment entry. `user_id` is set when the entry maps
/// to a registered user; pure contact entries leave it `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub position: i32,
    pub is_primary: bool,
}

impl Assignment {
    /// Build an assignment entry snapshotting a registered user's contact
    /// details. Used when the creator implicitly assigns themselves.
    pub fn from_user(user: &User, role: &str) -> Self {
        Self {
            user_id: Some(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            role: role.to_owned(),
            position: 0,
            is_primary: true,
        }
    }
}

/// Enforce the primary invariant on an assignment list: positions follow
/// list order, and a non-empty list has exactly one `is_primary` entry.
/// The first flagged entry wins; if none is flagged the first entry is
/// promoted.
pub fn normalize_assignments(entries: &mut [Assignment]) {
    let primary_idx = entries.iter().position(|e| e.is_primary).unwrap_or(0);
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.position = i as i32;
        entry.is_primary = i == primary_idx;
    }
}

/// User id backing the singular `lawyer`/`client` reference: the primary
/// entry's `user_id`, or `None` when the list is empty or the primary entry
/// is an unregistered contact.
pub fn primary_user_id(entries: &[Assignment]) -> Option<Uuid> {
    entries.iter().find(|e| e.is_primary).and_then(|e| e.user_id)
}

/// External advocate contact. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advocate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: i32,
}

/// Interested third party. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stakeholder {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub position: i32,
}

/// The case aggregate: root fields plus every child list, loaded and saved
/// as a unit.
#[derive(Debug, Clone)]
pub struct Case {
    pub id: Uuid,
    pub title: String,
    pub case_number: String,
    pub case_type: String,
    pub status: CaseStatus,
    pub court: Option<String>,
    pub description: Option<String>,
    pub is_urgent: bool,
    pub filing_date: NaiveDate,
    pub hearing_date: DateTime<Utc>,
    pub next_hearing_date: Option<DateTime<Utc>>,
    pub lawyer_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub lawyers: Vec<Assignment>,
    pub clients: Vec<Assignment>,
    pub parties: Parties,
    pub advocates: Vec<Advocate>,
    pub stakeholders: Vec<Stakeholder>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Re-establish the aggregate invariants after any mutation:
    /// party defaults, assignment positions and single-primary, child
    /// ordering, and the singular `lawyer_id`/`client_id` mirrors.
    /// Idempotent; safe to call on already-normalized data.
    pub fn normalize(&mut self) {
        self.parties.normalize();
        normalize_assignments(&mut self.lawyers);
        normalize_assignments(&mut self.clients);
        for (i, advocate) in self.advocates.iter_mut().enumerate() {
            advocate.position = i as i32;
        }
        for (i, stakeholder) in self.stakeholders.iter_mut().enumerate() {
            stakeholder.position = i as i32;
        }
        self.lawyer_id = primary_user_id(&self.lawyers);
        self.client_id = primary_user_id(&self.clients);
    }

    /// Field-level validation. Returns every violation rather than stopping
    /// at the first so the client can fix a payload in one round trip.
    pub fn validate(&self, today: NaiveDate) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.title.trim().is_empty() {
            violations.push(FieldViolation::new("title", "title is required"));
        }
        if self.filing_date > today {
            violations.push(FieldViolation::new(
                "filing_date",
                "filing date cannot be in the future",
            ));
        }
        validate_parties(&self.parties.petitioner, PartySide::Petitioner, &mut violations);
        validate_parties(&self.parties.respondent, PartySide::Respondent, &mut violations);
        violations
    }
}

fn validate_parties(parties: &[Party], side: PartySide, violations: &mut Vec<FieldViolation>) {
    for (i, party) in parties.iter().enumerate() {
        let path = |field: &str| format!("parties.{}[{}].{}", side.as_str(), i, field);
        if party.name.trim().is_empty() {
            violations.push(FieldViolation::new(path("name"), "party name is required"));
        }
        if !party.entity_type.trim().is_empty()
            && !ENTITY_TYPES
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&party.entity_type))
        {
            violations.push(FieldViolation::new(
                path("entity_type"),
                "entity type must be individual or organization",
            ));
        }
        if !party.role.trim().is_empty()
            && !side
                .allowed_roles()
                .iter()
                .any(|r| r.eq_ignore_ascii_case(&party.role))
        {
            violations.push(FieldViolation::new(
                path("role"),
                format!("role not valid for {} side", side.as_str()),
            ));
        }
    }
}

/// Generate a case number from the case type: a court-type prefix plus a
/// millisecond timestamp, e.g. `CIV-1767225600000`. Unknown types fall back
/// to `GEN`.
pub fn generate_case_number(case_type: &str, now: DateTime<Utc>) -> String {
    let prefix = match case_type.to_ascii_lowercase().as_str() {
        "civil" => "CIV",
        "criminal" => "CRM",
        "family" => "FAM",
        "commercial" => "COM",
        "labour" | "labor" => "LAB",
        "tax" => "TAX",
        "property" => "PRP",
        "constitutional" => "CST",
        _ => "GEN",
    };
    format!("{prefix}-{}", now.timestamp_millis())
}

/// Flat projection for list responses; child lists stay unloaded.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub id: Uuid,
    pub title: String,
    pub case_number: String,
    pub case_type: String,
    pub status: CaseStatus,
    pub court: Option<String>,
    pub is_urgent: bool,
    pub next_hearing_date: Option<DateTime<Utc>>,
    pub lawyer_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional filters for case list queries, applied inside the viewer's scope.
#[derive(Debug, Clone, Default)]
pub struct CaseListFilter {
    pub status: Option<CaseStatus>,
    pub case_type: Option<String>,
    pub is_urgent: Option<bool>,
    /// Matches against title and case number.
    pub q: Option<String>,
}
