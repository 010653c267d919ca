use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use causelist_domain::pagination::PageRequest;
use causelist_domain::role::Role;

use crate::domain::access::{Actor, can_delete_case, can_update_case, can_view_case, case_scope};
use crate::domain::case::{
    Advocate, Assignment, Case, CaseListFilter, CaseStatus, CaseSummary, Parties, Stakeholder,
    generate_case_number,
};
use crate::domain::repository::{CaseRepository, UserRepository};
use crate::error::CasesServiceError;

/// Result of a case write. `hearing_date_changed` tells the caller whether
/// the hearing-event synchronizer needs to run for this case.
#[derive(Debug)]
pub struct CaseWriteOutcome {
    pub case: Case,
    pub hearing_date_changed: bool,
}

// ── CreateCase ───────────────────────────────────────────────────────────────

pub struct CreateCaseInput {
    pub title: String,
    pub case_number: Option<String>,
    pub case_type: String,
    pub status: Option<CaseStatus>,
    pub court: Option<String>,
    pub description: Option<String>,
    pub is_urgent: bool,
    pub filing_date: Option<NaiveDate>,
    pub hearing_date: Option<DateTime<Utc>>,
    pub next_hearing_date: Option<DateTime<Utc>>,
    pub lawyers: Vec<Assignment>,
    pub clients: Vec<Assignment>,
    pub parties: Parties,
    pub advocates: Vec<Advocate>,
    pub stakeholders: Vec<Stakeholder>,
}

pub struct CreateCaseUseCase<C: CaseRepository, U: UserRepository> {
    pub cases: C,
    pub users: U,
}

impl<C: CaseRepository, U: UserRepository> CreateCaseUseCase<C, U> {
    pub async fn execute(
        &self,
        actor: &Actor,
        input: CreateCaseInput,
    ) -> Result<CaseWriteOutcome, CasesServiceError> {
        let now = Utc::now();

        let mut lawyers = input.lawyers;
        let mut clients = input.clients;
        // A creating lawyer/client who supplied no matching assignment list
        // becomes its sole primary entry, contact details snapshotted from
        // their user record.
        match actor.role {
            Role::Lawyer if lawyers.is_empty() => {
                if let Some(user) = self.users.find_by_id(actor.user_id).await? {
                    lawyers.push(Assignment::from_user(&user, "lead"));
                }
            }
            Role::Client if clients.is_empty() => {
                if let Some(user) = self.users.find_by_id(actor.user_id).await? {
                    clients.push(Assignment::from_user(&user, "primary"));
                }
            }
            _ => {}
        }

        let case_number = input
            .case_number
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| generate_case_number(&input.case_type, now));

        let mut case = Case {
            id: Uuid::now_v7(),
            title: input.title,
            case_number,
            case_type: input.case_type,
            status: input.status.unwrap_or(CaseStatus::Active),
            court: input.court.filter(|c| !c.trim().is_empty()),
            description: input.description.filter(|d| !d.trim().is_empty()),
            is_urgent: input.is_urgent,
            filing_date: input.filing_date.unwrap_or_else(|| now.date_naive()),
            hearing_date: input.hearing_date.unwrap_or(now + Duration::days(7)),
            next_hearing_date: input.next_hearing_date,
            lawyer_id: None,
            client_id: None,
            lawyers,
            clients,
            parties: input.parties,
            advocates: input.advocates,
            stakeholders: input.stakeholders,
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        };
        case.normalize();

        let violations = case.validate(now.date_naive());
        if !violations.is_empty() {
            return Err(CasesServiceError::Validation(violations));
        }
        // Pre-check for a friendly error; the unique constraint still backs
        // the race window.
        if self.cases.case_number_exists(&case.case_number).await? {
            return Err(CasesServiceError::CaseNumberTaken);
        }
        self.cases.create(&case).await?;
        Ok(CaseWriteOutcome {
            hearing_date_changed: case.next_hearing_date.is_some(),
            case,
        })
    }
}

// ── GetCase ──────────────────────────────────────────────────────────────────

pub struct GetCaseUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> GetCaseUseCase<C> {
    pub async fn execute(&self, actor: &Actor, case_id: Uuid) -> Result<Case, CasesServiceError> {
        let case = self
            .cases
            .find_by_id(case_id)
            .await?
            .ok_or(CasesServiceError::CaseNotFound)?;
        if !can_view_case(actor, &case) {
            return Err(CasesServiceError::Forbidden);
        }
        Ok(case)
    }
}

// ── UpdateCase ───────────────────────────────────────────────────────────────

/// Partial update. Absent fields keep their persisted values; provided child
/// lists replace the stored ones wholesale. An empty string on `court` /
/// `description` clears the field.
#[derive(Default)]
pub struct UpdateCaseInput {
    pub title: Option<String>,
    pub case_number: Option<String>,
    pub case_type: Option<String>,
    pub status: Option<CaseStatus>,
    pub court: Option<String>,
    pub description: Option<String>,
    pub is_urgent: Option<bool>,
    pub filing_date: Option<NaiveDate>,
    pub hearing_date: Option<DateTime<Utc>>,
    pub next_hearing_date: Option<DateTime<Utc>>,
    pub lawyers: Option<Vec<Assignment>>,
    pub clients: Option<Vec<Assignment>>,
    pub parties: Option<Parties>,
    pub advocates: Option<Vec<Advocate>>,
    pub stakeholders: Option<Vec<Stakeholder>>,
}

pub struct UpdateCaseUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> UpdateCaseUseCase<C> {
    pub async fn execute(
        &self,
        actor: &Actor,
        case_id: Uuid,
        input: UpdateCaseInput,
    ) -> Result<CaseWriteOutcome, CasesServiceError> {
        let mut case = self
            .cases
            .find_by_id(case_id)
            .await?
            .ok_or(CasesServiceError::CaseNotFound)?;
        if !can_update_case(actor, &case) {
            return Err(CasesServiceError::Forbidden);
        }
        let now = Utc::now();
        let previous_hearing = case.next_hearing_date;

        if let Some(title) = input.title {
            case.title = title;
        }
        if let Some(number) = input.case_number {
            let number = number.trim().to_owned();
            if !number.is_empty() && number != case.case_number {
                if self.cases.case_number_exists(&number).await? {
                    return Err(CasesServiceError::CaseNumberTaken);
                }
                case.case_number = number;
            }
        }
        if let Some(case_type) = input.case_type {
            case.case_type = case_type;
        }
        if let Some(status) = input.status {
            case.status = status;
        }
        if let Some(court) = input.court {
            case.court = Some(court).filter(|c| !c.trim().is_empty());
        }
        if let Some(description) = input.description {
            case.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(is_urgent) = input.is_urgent {
            case.is_urgent = is_urgent;
        }
        if let Some(filing_date) = input.filing_date {
            case.filing_date = filing_date;
        }
        if let Some(hearing_date) = input.hearing_date {
            case.hearing_date = hearing_date;
        }
        if let Some(next_hearing_date) = input.next_hearing_date {
            case.next_hearing_date = Some(next_hearing_date);
        }
        if let Some(lawyers) = input.lawyers {
            case.lawyers = lawyers;
        }
        if let Some(clients) = input.clients {
            case.clients = clients;
        }
        if let Some(parties) = input.parties {
            case.parties = parties;
        }
        if let Some(advocates) = input.advocates {
            case.advocates = advocates;
        }
        if let Some(stakeholders) = input.stakeholders {
            case.stakeholders = stakeholders;
        }

        case.normalize();
        let violations = case.validate(now.date_naive());
        if !violations.is_empty() {
            return Err(CasesServiceError::Validation(violations));
        }
        case.updated_at = now;
        self.cases.save(&case).await?;
        Ok(CaseWriteOutcome {
            hearing_date_changed: case.next_hearing_date != previous_hearing
                && case.next_hearing_date.is_some(),
            case,
        })
    }
}

// ── DeleteCase ───────────────────────────────────────────────────────────────

pub struct DeleteCaseUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> DeleteCaseUseCase<C> {
    pub async fn execute(&self, actor: &Actor, case_id: Uuid) -> Result<(), CasesServiceError> {
        let case = self
            .cases
            .find_by_id(case_id)
            .await?
            .ok_or(CasesServiceError::CaseNotFound)?;
        if !can_delete_case(actor, &case) {
            return Err(CasesServiceError::Forbidden);
        }
        if !self.cases.delete(case_id).await? {
            return Err(CasesServiceError::CaseNotFound);
        }
        Ok(())
    }
}

// ── ListCases ────────────────────────────────────────────────────────────────

pub struct ListCasesUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> ListCasesUseCase<C> {
    pub async fn execute(
        &self,
        actor: &Actor,
        filter: CaseListFilter,
        page: PageRequest,
    ) -> Result<Vec<CaseSummary>, CasesServiceError> {
        let scope = case_scope(actor);
        self.cases.list(&scope, &filter, page.clamped()).await
    }
}
