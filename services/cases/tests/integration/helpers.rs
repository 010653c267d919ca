use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use causelist_cases::domain::access::{Actor, CaseScope, scope_allows};
use causelist_cases::domain::case::{Case, CaseListFilter, CaseStatus, CaseSummary, Parties};
use causelist_cases::domain::document::{AccessGrant, Document};
use causelist_cases::domain::event::{
    Event, EventListFilter, EventStatus, EventType, InvitationStatus,
};
use causelist_cases::domain::repository::{
    BlobStore, CaseRepository, DocumentRepository, EventRepository, Notifier, UserRepository,
};
use causelist_cases::domain::user::User;
use causelist_cases::error::CasesServiceError;
use causelist_domain::pagination::PageRequest;
use causelist_domain::role::Role;

// ── TestStore ────────────────────────────────────────────────────────────────

/// One in-memory store behind all four repositories, so cross-aggregate
/// behavior (event visibility through the owning case, document grants)
/// matches what the database enforces. Tests seed state through the
/// `seed_*` methods and inspect it through the public mutex fields.
#[derive(Default)]
pub struct TestStore {
    pub cases: Mutex<Vec<Case>>,
    pub events: Mutex<Vec<Event>>,
    pub documents: Mutex<Vec<Document>>,
    pub users: Mutex<Vec<User>>,
    pub favorites: Mutex<Vec<(Uuid, Uuid)>>,
}

impl TestStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn seed_case(&self, case: Case) {
        self.cases.lock().unwrap().push(case);
    }
}

fn summary(case: &Case) -> CaseSummary {
    CaseSummary {
        id: case.id,
        title: case.title.clone(),
        case_number: case.case_number.clone(),
        case_type: case.case_type.clone(),
        status: case.status,
        court: case.court.clone(),
        is_urgent: case.is_urgent,
        next_hearing_date: case.next_hearing_date,
        lawyer_id: case.lawyer_id,
        client_id: case.client_id,
        created_by: case.created_by,
        created_at: case.created_at,
        updated_at: case.updated_at,
    }
}

impl CaseRepository for Arc<TestStore> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>, CasesServiceError> {
        Ok(self.cases.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn case_number_exists(&self, case_number: &str) -> Result<bool, CasesServiceError> {
        Ok(self
            .cases
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.case_number == case_number))
    }

    async fn create(&self, case: &Case) -> Result<(), CasesServiceError> {
        let mut cases = self.cases.lock().unwrap();
        if cases.iter().any(|c| c.case_number == case.case_number) {
            return Err(CasesServiceError::CaseNumberTaken);
        }
        cases.push(case.clone());
        Ok(())
    }

    async fn save(&self, case: &Case) -> Result<(), CasesServiceError> {
        let mut cases = self.cases.lock().unwrap();
        cases.retain(|c| c.id != case.id);
        cases.push(case.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CasesServiceError> {
        let mut cases = self.cases.lock().unwrap();
        let before = cases.len();
        cases.retain(|c| c.id != id);
        // Cascade like the schema.
        self.events
            .lock()
            .unwrap()
            .retain(|e| e.case_id != Some(id));
        self.documents.lock().unwrap().retain(|d| d.case_id != id);
        Ok(cases.len() < before)
    }

    async fn list(
        &self,
        scope: &CaseScope,
        filter: &CaseListFilter,
        page: PageRequest,
    ) -> Result<Vec<CaseSummary>, CasesServiceError> {
        let cases = self.cases.lock().unwrap();
        let mut rows: Vec<CaseSummary> = cases
            .iter()
            .filter(|c| scope_allows(scope, c))
            .filter(|c| filter.status.is_none_or(|s| c.status == s))
            .filter(|c| filter.is_urgent.is_none_or(|u| c.is_urgent == u))
            .filter(|c| filter.case_type.as_deref().is_none_or(|t| c.case_type == t))
            .filter(|c| {
                filter
                    .q
                    .as_deref()
                    .is_none_or(|q| c.title.contains(q) || c.case_number.contains(q))
            })
            .map(summary)
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn count_by_status(
        &self,
        scope: &CaseScope,
    ) -> Result<Vec<(CaseStatus, u64)>, CasesServiceError> {
        let cases = self.cases.lock().unwrap();
        let mut counts = Vec::new();
        for status in CaseStatus::ALL {
            let n = cases
                .iter()
                .filter(|c| scope_allows(scope, c) && c.status == status)
                .count() as u64;
            if n > 0 {
                counts.push((status, n));
            }
        }
        Ok(counts)
    }
}

impl EventRepository for Arc<TestStore> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, CasesServiceError> {
        Ok(self.events.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, event: &Event) -> Result<(), CasesServiceError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), CasesServiceError> {
        let mut events = self.events.lock().unwrap();
        events.retain(|e| e.id != event.id);
        events.push(event.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CasesServiceError> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() < before)
    }

    async fn list(
        &self,
        viewer: Uuid,
        scope: &CaseScope,
        filter: &EventListFilter,
        page: PageRequest,
    ) -> Result<Vec<Event>, CasesServiceError> {
        let cases = self.cases.lock().unwrap();
        let events = self.events.lock().unwrap();
        let visible = |event: &Event| {
            matches!(scope, CaseScope::All)
                || event.created_by == viewer
                || event.participants.iter().any(|p| p.user_id == viewer)
                || event.case_id.is_some_and(|case_id| {
                    cases
                        .iter()
                        .find(|c| c.id == case_id)
                        .is_some_and(|c| scope_allows(scope, c))
                })
        };
        let mut rows: Vec<Event> = events
            .iter()
            .filter(|e| visible(e))
            .filter(|e| filter.case_id.is_none_or(|id| e.case_id == Some(id)))
            .filter(|e| filter.event_type.is_none_or(|t| e.event_type == t))
            .filter(|e| filter.from.is_none_or(|from| e.start_time >= from))
            .filter(|e| filter.to.is_none_or(|to| e.start_time < to))
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.start_time);
        Ok(rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn find_scheduled_hearing(
        &self,
        case_id: Uuid,
    ) -> Result<Option<Event>, CasesServiceError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                e.case_id == Some(case_id)
                    && e.event_type == EventType::Hearing
                    && e.status == EventStatus::Scheduled
            })
            .min_by_key(|e| e.start_time)
            .cloned())
    }

    async fn upcoming_hearings(
        &self,
        scope: &CaseScope,
        after: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Event>, CasesServiceError> {
        let cases = self.cases.lock().unwrap();
        let events = self.events.lock().unwrap();
        let mut rows: Vec<Event> = events
            .iter()
            .filter(|e| {
                e.event_type == EventType::Hearing
                    && e.status == EventStatus::Scheduled
                    && e.start_time > after
            })
            .filter(|e| {
                matches!(scope, CaseScope::All)
                    || e.case_id.is_some_and(|case_id| {
                        cases
                            .iter()
                            .find(|c| c.id == case_id)
                            .is_some_and(|c| scope_allows(scope, c))
                    })
            })
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.start_time);
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn set_participant_status(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: InvitationStatus,
    ) -> Result<bool, CasesServiceError> {
        let mut events = self.events.lock().unwrap();
        let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
            return Ok(false);
        };
        match event.participants.iter_mut().find(|p| p.user_id == user_id) {
            Some(p) => {
                p.invitation_status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl DocumentRepository for Arc<TestStore> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, CasesServiceError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn create(&self, document: &Document) -> Result<(), CasesServiceError> {
        self.documents.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CasesServiceError> {
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| d.id != id);
        self.favorites.lock().unwrap().retain(|(doc, _)| *doc != id);
        Ok(documents.len() < before)
    }

    async fn list_by_case(&self, case_id: Uuid) -> Result<Vec<Document>, CasesServiceError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.case_id == case_id)
            .cloned()
            .collect())
    }

    async fn grant_access(
        &self,
        document_id: Uuid,
        grant: &AccessGrant,
    ) -> Result<(), CasesServiceError> {
        let mut documents = self.documents.lock().unwrap();
        let Some(doc) = documents.iter_mut().find(|d| d.id == document_id) else {
            return Ok(());
        };
        match doc.access.iter_mut().find(|g| g.user_id == grant.user_id) {
            Some(existing) => *existing = grant.clone(),
            None => doc.access.push(grant.clone()),
        }
        Ok(())
    }

    async fn set_favorite(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        favorite: bool,
    ) -> Result<bool, CasesServiceError> {
        let mut favorites = self.favorites.lock().unwrap();
        let key = (document_id, user_id);
        let present = favorites.contains(&key);
        if favorite && !present {
            favorites.push(key);
            Ok(true)
        } else if !favorite && present {
            favorites.retain(|k| *k != key);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn is_favorite(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, CasesServiceError> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .contains(&(document_id, user_id)))
    }
}

impl UserRepository for Arc<TestStore> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CasesServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), CasesServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(CasesServiceError::EmailTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn list(
        &self,
        role: Option<Role>,
        page: PageRequest,
    ) -> Result<Vec<User>, CasesServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }
}

// ── SpyNotifier ──────────────────────────────────────────────────────────────

/// Records the recipient of every delivery and never fails.
#[derive(Default)]
pub struct SpyNotifier {
    pub emails: Mutex<Vec<String>>,
    pub sms: Mutex<Vec<String>>,
}

impl SpyNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl Notifier for Arc<SpyNotifier> {
    async fn send_email(
        &self,
        to: &str,
        _subject: &str,
        _body: &str,
    ) -> Result<(), CasesServiceError> {
        self.emails.lock().unwrap().push(to.to_owned());
        Ok(())
    }

    async fn send_sms(&self, to: &str, _body: &str) -> Result<(), CasesServiceError> {
        self.sms.lock().unwrap().push(to.to_owned());
        Ok(())
    }
}

// ── FakeBlobStore ────────────────────────────────────────────────────────────

/// Keeps no bytes, only the paths that were uploaded and deleted.
#[derive(Default)]
pub struct FakeBlobStore {
    pub uploads: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
}

impl FakeBlobStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl BlobStore for Arc<FakeBlobStore> {
    async fn upload(
        &self,
        path: &str,
        _bytes: Bytes,
        _mime_type: &str,
    ) -> Result<String, CasesServiceError> {
        self.uploads.lock().unwrap().push(path.to_owned());
        Ok(format!("https://files.test/{path}"))
    }

    async fn delete(&self, path: &str) -> Result<(), CasesServiceError> {
        self.deleted.lock().unwrap().push(path.to_owned());
        Ok(())
    }

    async fn signed_url(
        &self,
        path: &str,
        expires_in: std::time::Duration,
    ) -> Result<String, CasesServiceError> {
        Ok(format!(
            "https://files.test/{path}?expires={}",
            expires_in.as_secs()
        ))
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn actor(user: &User) -> Actor {
    Actor {
        user_id: user.id,
        role: user.role,
    }
}

pub fn test_user(role: Role) -> User {
    let id = Uuid::now_v7();
    User {
        id,
        name: "Meera Nair".to_owned(),
        email: format!("{role}-{}@example.com", id.simple()),
        phone: Some("+15550123".to_owned()),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Normalized case with no assignments. The case number derives from the
/// fixture id so seeding several cases never trips the uniqueness check.
pub fn test_case(created_by: Uuid) -> Case {
    let id = Uuid::now_v7();
    let now = Utc::now();
    let mut case = Case {
        id,
        title: "Nair v. Veritas Holdings".to_owned(),
        case_number: format!("CIV-{}", id.simple()),
        case_type: "civil".to_owned(),
        status: CaseStatus::Active,
        court: Some("City Civil Court".to_owned()),
        description: None,
        is_urgent: false,
        filing_date: now.date_naive(),
        hearing_date: now + Duration::days(14),
        next_hearing_date: None,
        lawyer_id: None,
        client_id: None,
        lawyers: vec![],
        clients: vec![],
        parties: Parties::default(),
        advocates: vec![],
        stakeholders: vec![],
        created_by,
        created_at: now,
        updated_at: now,
    };
    case.normalize();
    case
}
