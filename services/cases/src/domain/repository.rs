#![allow(async_fn_in_trait)]

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use causelist_domain::pagination::PageRequest;
use causelist_domain::role::Role;

use crate::domain::access::CaseScope;
use crate::domain::case::{Case, CaseListFilter, CaseStatus, CaseSummary};
use crate::domain::document::{AccessGrant, Document};
use crate::domain::event::{Event, EventListFilter, InvitationStatus};
use crate::domain::user::User;
use crate::error::CasesServiceError;

/// Repository for the case aggregate. Loads and saves root plus child
/// lists as a unit; child rows are replaced wholesale on save.
pub trait CaseRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>, CasesServiceError>;

    async fn case_number_exists(&self, case_number: &str) -> Result<bool, CasesServiceError>;

    /// Insert the whole aggregate in one transaction.
    /// Duplicate `case_number` surfaces as `CaseNumberTaken`.
    async fn create(&self, case: &Case) -> Result<(), CasesServiceError>;

    /// Replace the persisted aggregate with `case` in one transaction.
    async fn save(&self, case: &Case) -> Result<(), CasesServiceError>;

    /// Delete the case; children, events, and documents follow via cascade.
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CasesServiceError>;

    async fn list(
        &self,
        scope: &CaseScope,
        filter: &CaseListFilter,
        page: PageRequest,
    ) -> Result<Vec<CaseSummary>, CasesServiceError>;

    /// Per-status case counts within the scope, for the dashboard.
    async fn count_by_status(
        &self,
        scope: &CaseScope,
    ) -> Result<Vec<(CaseStatus, u64)>, CasesServiceError>;
}

/// Repository for calendar events and their participant rows.
pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, CasesServiceError>;

    async fn create(&self, event: &Event) -> Result<(), CasesServiceError>;

    /// Update the event row and replace its participant rows.
    async fn update(&self, event: &Event) -> Result<(), CasesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CasesServiceError>;

    /// Events visible to `viewer`: created by them, with them as
    /// participant, or on a case inside `scope`. `CaseScope::All` sees
    /// every event. Filters apply after visibility.
    async fn list(
        &self,
        viewer: Uuid,
        scope: &CaseScope,
        filter: &EventListFilter,
        page: PageRequest,
    ) -> Result<Vec<Event>, CasesServiceError>;

    /// The scheduled hearing event for a case, if any. The synchronizer's
    /// create-or-update pivot.
    async fn find_scheduled_hearing(&self, case_id: Uuid)
    -> Result<Option<Event>, CasesServiceError>;

    /// Next scheduled hearings within the scope, soonest first.
    async fn upcoming_hearings(
        &self,
        scope: &CaseScope,
        after: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Event>, CasesServiceError>;

    /// Record a participant's invitation response.
    /// Returns `false` when the user is not a participant of the event.
    async fn set_participant_status(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: InvitationStatus,
    ) -> Result<bool, CasesServiceError>;
}

/// Repository for document metadata, grants, and favorites.
pub trait DocumentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, CasesServiceError>;

    async fn create(&self, document: &Document) -> Result<(), CasesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CasesServiceError>;

    async fn list_by_case(&self, case_id: Uuid) -> Result<Vec<Document>, CasesServiceError>;

    /// Insert or update the grant for `(document_id, grant.user_id)`.
    async fn grant_access(
        &self,
        document_id: Uuid,
        grant: &AccessGrant,
    ) -> Result<(), CasesServiceError>;

    /// Set or clear a favorite mark. Returns `true` if the state changed.
    async fn set_favorite(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        favorite: bool,
    ) -> Result<bool, CasesServiceError>;

    async fn is_favorite(&self, document_id: Uuid, user_id: Uuid)
    -> Result<bool, CasesServiceError>;
}

/// Repository for registered users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CasesServiceError>;

    /// Insert a user. Duplicate email surfaces as `EmailTaken`.
    async fn create(&self, user: &User) -> Result<(), CasesServiceError>;

    async fn list(
        &self,
        role: Option<Role>,
        page: PageRequest,
    ) -> Result<Vec<User>, CasesServiceError>;
}

/// Outbound notification channels. Implementations deliver best-effort;
/// callers log failures and never propagate them into request handling.
pub trait Notifier: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str)
    -> Result<(), CasesServiceError>;

    async fn send_sms(&self, to: &str, body: &str) -> Result<(), CasesServiceError>;
}

/// External blob store holding document bytes.
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `path`; returns the stable URL.
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        mime_type: &str,
    ) -> Result<String, CasesServiceError>;

    async fn delete(&self, path: &str) -> Result<(), CasesServiceError>;

    /// Temporary signed URL for direct download.
    async fn signed_url(
        &self,
        path: &str,
        expires_in: std::time::Duration,
    ) -> Result<String, CasesServiceError>;
}
