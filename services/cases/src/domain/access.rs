//! Pure authorization predicates over the viewing actor and the loaded
//! resource. Repositories translate [`CaseScope`] into SQL for list queries;
//! single-resource handlers load first, then ask these predicates, so a
//! missing resource is always `NotFound` before it can be `Forbidden`.

use uuid::Uuid;

use causelist_domain::role::Role;

use crate::domain::case::Case;
use crate::domain::document::Document;
use crate::domain::event::Event;

/// The authenticated caller, as asserted by the gateway.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

/// Queryable-case scope for list endpoints. `Lawyer`/`Client` restrict to
/// cases where the user is the singular reference or an assignment-list
/// member; `All` is unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseScope {
    All,
    Lawyer(Uuid),
    Client(Uuid),
}

/// Ties broaden: an admin always gets `All`, whatever else they are.
pub fn case_scope(actor: &Actor) -> CaseScope {
    match actor.role {
        Role::Admin => CaseScope::All,
        Role::Lawyer => CaseScope::Lawyer(actor.user_id),
        Role::Client => CaseScope::Client(actor.user_id),
    }
}

/// Whether a loaded case falls inside a list scope. This is the reference
/// semantics; the repository's SQL translation must agree with it.
pub fn scope_allows(scope: &CaseScope, case: &Case) -> bool {
    match scope {
        CaseScope::All => true,
        CaseScope::Lawyer(id) => is_assigned_lawyer(case, *id),
        CaseScope::Client(id) => is_assigned_client(case, *id),
    }
}

fn is_assigned_lawyer(case: &Case, user_id: Uuid) -> bool {
    case.lawyer_id == Some(user_id)
        || case.lawyers.iter().any(|a| a.user_id == Some(user_id))
}

fn is_assigned_client(case: &Case, user_id: Uuid) -> bool {
    case.client_id == Some(user_id)
        || case.clients.iter().any(|a| a.user_id == Some(user_id))
}

/// Read access: admin, any assigned lawyer or client (singular reference or
/// list member), or the creator.
pub fn can_view_case(actor: &Actor, case: &Case) -> bool {
    actor.role.is_admin()
        || case.created_by == actor.user_id
        || is_assigned_lawyer(case, actor.user_id)
        || is_assigned_client(case, actor.user_id)
}

/// Write access: everything view allows, plus the self-assignment path. A
/// lawyer may take an update on a case that has no primary lawyer yet, a
/// client symmetrically when there is no primary client.
pub fn can_update_case(actor: &Actor, case: &Case) -> bool {
    if can_view_case(actor, case) {
        return true;
    }
    match actor.role {
        Role::Lawyer => !case.lawyers.iter().any(|a| a.is_primary),
        Role::Client => !case.clients.iter().any(|a| a.is_primary),
        Role::Admin => true,
    }
}

/// Delete is reserved for admins and the primary representatives (the
/// singular references), not arbitrary list members.
pub fn can_delete_case(actor: &Actor, case: &Case) -> bool {
    actor.role.is_admin()
        || case.lawyer_id == Some(actor.user_id)
        || case.client_id == Some(actor.user_id)
}

fn is_participant(event: &Event, user_id: Uuid) -> bool {
    event.participants.iter().any(|p| p.user_id == user_id)
}

/// Event visibility: creator and participants always; otherwise inherited
/// from the owning case when there is one.
pub fn can_view_event(actor: &Actor, event: &Event, owning_case: Option<&Case>) -> bool {
    if actor.role.is_admin()
        || event.created_by == actor.user_id
        || is_participant(event, actor.user_id)
    {
        return true;
    }
    owning_case.is_some_and(|case| can_view_case(actor, case))
}

/// Event mutation: admin or creator; case-linked events also follow the
/// case's update rights.
pub fn can_update_event(actor: &Actor, event: &Event, owning_case: Option<&Case>) -> bool {
    if actor.role.is_admin() || event.created_by == actor.user_id {
        return true;
    }
    owning_case.is_some_and(|case| can_update_case(actor, case))
}

/// Document visibility: uploader, grant holders, or anyone who can view the
/// owning case.
pub fn can_view_document(actor: &Actor, document: &Document, owning_case: &Case) -> bool {
    actor.role.is_admin()
        || document.uploaded_by == actor.user_id
        || document.has_grant(actor.user_id)
        || can_view_case(actor, owning_case)
}

/// Document management (delete, access grants): admin, the uploader, or the
/// case's primary representatives.
pub fn can_manage_document(actor: &Actor, document: &Document, owning_case: &Case) -> bool {
    actor.role.is_admin()
        || document.uploaded_by == actor.user_id
        || can_delete_case(actor, owning_case)
}
