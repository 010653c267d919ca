//! sea-orm repository implementations. Aggregates are loaded root-first with
//! ordered child queries and written in one transaction per save, children
//! replaced wholesale.

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, TransactionError, TransactionTrait,
    sea_query::{Expr, OnConflict, Query, SelectStatement},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use causelist_cases_schema::{
    case_advocates, case_clients, case_lawyers, case_parties, case_stakeholders, cases,
    document_access, document_favorites, documents, event_participants, events, users,
};
use causelist_domain::pagination::PageRequest;
use causelist_domain::role::Role;

use crate::domain::access::CaseScope;
use crate::domain::case::{
    Advocate, Assignment, Case, CaseListFilter, CaseStatus, CaseSummary, Parties, Party, PartySide,
    Stakeholder,
};
use crate::domain::document::{AccessGrant, AccessLevel, Document};
use crate::domain::event::{
    Event, EventListFilter, EventPriority, EventStatus, EventType, InvitationStatus, Participant,
};
use crate::domain::repository::{
    CaseRepository, DocumentRepository, EventRepository, UserRepository,
};
use crate::domain::user::User;
use crate::error::CasesServiceError;

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    matches!(
        e.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

/// `WHERE` fragment selecting the cases inside a scope; `None` means
/// unrestricted. Must agree with `domain::access::scope_allows`.
fn scope_condition(scope: &CaseScope) -> Option<Condition> {
    match scope {
        CaseScope::All => None,
        CaseScope::Lawyer(id) => Some(
            Condition::any()
                .add(cases::Column::LawyerId.eq(*id))
                .add(
                    cases::Column::Id.in_subquery(
                        Query::select()
                            .column(case_lawyers::Column::CaseId)
                            .from(case_lawyers::Entity)
                            .and_where(Expr::col(case_lawyers::Column::UserId).eq(*id))
                            .to_owned(),
                    ),
                ),
        ),
        CaseScope::Client(id) => Some(
            Condition::any()
                .add(cases::Column::ClientId.eq(*id))
                .add(
                    cases::Column::Id.in_subquery(
                        Query::select()
                            .column(case_clients::Column::CaseId)
                            .from(case_clients::Entity)
                            .and_where(Expr::col(case_clients::Column::UserId).eq(*id))
                            .to_owned(),
                    ),
                ),
        ),
    }
}

/// Subquery of case ids inside a scope, for filtering case-linked rows from
/// other tables. `None` means unrestricted.
fn case_ids_in_scope(scope: &CaseScope) -> Option<SelectStatement> {
    scope_condition(scope).map(|cond| {
        Query::select()
            .column(cases::Column::Id)
            .from(cases::Entity)
            .cond_where(cond)
            .to_owned()
    })
}

// ── Case repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCaseRepository {
    pub db: DatabaseConnection,
}

impl CaseRepository for DbCaseRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>, CasesServiceError> {
        let Some(model) = cases::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find case by id")?
        else {
            return Ok(None);
        };
        Ok(Some(self.load_aggregate(model).await?))
    }

    async fn case_number_exists(&self, case_number: &str) -> Result<bool, CasesServiceError> {
        let found = cases::Entity::find()
            .filter(cases::Column::CaseNumber.eq(case_number))
            .one(&self.db)
            .await
            .context("check case number")?;
        Ok(found.is_some())
    }

    async fn create(&self, case: &Case) -> Result<(), CasesServiceError> {
        let result = self
            .db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let case = case.clone();
                Box::pin(async move {
                    case_row(&case).insert(txn).await?;
                    insert_children(txn, &case).await?;
                    Ok(())
                })
            })
            .await;
        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(e)) if is_unique_violation(&e) => {
                Err(CasesServiceError::CaseNumberTaken)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create case").into()),
        }
    }

    async fn save(&self, case: &Case) -> Result<(), CasesServiceError> {
        let result = self
            .db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let case = case.clone();
                Box::pin(async move {
                    case_row(&case).update(txn).await?;
                    case_lawyers::Entity::delete_many()
                        .filter(case_lawyers::Column::CaseId.eq(case.id))
                        .exec(txn)
                        .await?;
                    case_clients::Entity::delete_many()
                        .filter(case_clients::Column::CaseId.eq(case.id))
                        .exec(txn)
                        .await?;
                    case_parties::Entity::delete_many()
                        .filter(case_parties::Column::CaseId.eq(case.id))
                        .exec(txn)
                        .await?;
                    case_advocates::Entity::delete_many()
                        .filter(case_advocates::Column::CaseId.eq(case.id))
                        .exec(txn)
                        .await?;
                    case_stakeholders::Entity::delete_many()
                        .filter(case_stakeholders::Column::CaseId.eq(case.id))
                        .exec(txn)
                        .await?;
                    insert_children(txn, &case).await?;
                    Ok(())
                })
            })
            .await;
        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(e)) if is_unique_violation(&e) => {
                Err(CasesServiceError::CaseNumberTaken)
            }
            Err(e) => Err(anyhow::Error::new(e).context("save case").into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CasesServiceError> {
        let result = cases::Entity::delete_many()
            .filter(cases::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete case")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        scope: &CaseScope,
        filter: &CaseListFilter,
        page: PageRequest,
    ) -> Result<Vec<CaseSummary>, CasesServiceError> {
        let page = page.clamped();
        let mut query = cases::Entity::find();
        if let Some(cond) = scope_condition(scope) {
            query = query.filter(cond);
        }
        if let Some(status) = filter.status {
            query = query.filter(cases::Column::Status.eq(status.as_str()));
        }
        if let Some(ref case_type) = filter.case_type {
            query = query.filter(cases::Column::CaseType.eq(case_type.as_str()));
        }
        if let Some(is_urgent) = filter.is_urgent {
            query = query.filter(cases::Column::IsUrgent.eq(is_urgent));
        }
        if let Some(ref q) = filter.q {
            query = query.filter(
                Condition::any()
                    .add(cases::Column::Title.contains(q))
                    .add(cases::Column::CaseNumber.contains(q)),
            );
        }
        let models = query
            .order_by_desc(cases::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list cases")?;
        models.into_iter().map(summary_from_model).collect()
    }

    async fn count_by_status(
        &self,
        scope: &CaseScope,
    ) -> Result<Vec<(CaseStatus, u64)>, CasesServiceError> {
        #[derive(FromQueryResult)]
        struct StatusCount {
            status: String,
            count: i64,
        }

        let mut query = cases::Entity::find()
            .select_only()
            .column(cases::Column::Status)
            .column_as(cases::Column::Id.count(), "count")
            .group_by(cases::Column::Status);
        if let Some(cond) = scope_condition(scope) {
            query = query.filter(cond);
        }
        let rows = query
            .into_model::<StatusCount>()
            .all(&self.db)
            .await
            .context("count cases by status")?;

        let mut counts = Vec::new();
        for status in CaseStatus::ALL {
            if let Some(row) = rows.iter().find(|r| r.status == status.as_str()) {
                counts.push((status, row.count as u64));
            }
        }
        Ok(counts)
    }
}

impl DbCaseRepository {
    async fn load_aggregate(&self, model: cases::Model) -> Result<Case, CasesServiceError> {
        let lawyers = case_lawyers::Entity::find()
            .filter(case_lawyers::Column::CaseId.eq(model.id))
            .order_by_asc(case_lawyers::Column::Position)
            .all(&self.db)
            .await
            .context("load case lawyers")?;
        let clients = case_clients::Entity::find()
            .filter(case_clients::Column::CaseId.eq(model.id))
            .order_by_asc(case_clients::Column::Position)
            .all(&self.db)
            .await
            .context("load case clients")?;
        let parties = case_parties::Entity::find()
            .filter(case_parties::Column::CaseId.eq(model.id))
            .order_by_asc(case_parties::Column::Position)
            .all(&self.db)
            .await
            .context("load case parties")?;
        let advocates = case_advocates::Entity::find()
            .filter(case_advocates::Column::CaseId.eq(model.id))
            .order_by_asc(case_advocates::Column::Position)
            .all(&self.db)
            .await
            .context("load case advocates")?;
        let stakeholders = case_stakeholders::Entity::find()
            .filter(case_stakeholders::Column::CaseId.eq(model.id))
            .order_by_asc(case_stakeholders::Column::Position)
            .all(&self.db)
            .await
            .context("load case stakeholders")?;
        case_from_models(model, lawyers, clients, parties, advocates, stakeholders)
    }
}

fn case_row(case: &Case) -> cases::ActiveModel {
    cases::ActiveModel {
        id: Set(case.id),
        title: Set(case.title.clone()),
        case_number: Set(case.case_number.clone()),
        case_type: Set(case.case_type.clone()),
        status: Set(case.status.as_str().to_owned()),
        court: Set(case.court.clone()),
        description: Set(case.description.clone()),
        is_urgent: Set(case.is_urgent),
        filing_date: Set(case.filing_date),
        hearing_date: Set(case.hearing_date),
        next_hearing_date: Set(case.next_hearing_date),
        lawyer_id: Set(case.lawyer_id),
        client_id: Set(case.client_id),
        created_by: Set(case.created_by),
        created_at: Set(case.created_at),
        updated_at: Set(case.updated_at),
    }
}

async fn insert_children(
    txn: &sea_orm::DatabaseTransaction,
    case: &Case,
) -> Result<(), sea_orm::DbErr> {
    for entry in &case.lawyers {
        case_lawyers::ActiveModel {
            id: Set(Uuid::now_v7()),
            case_id: Set(case.id),
            user_id: Set(entry.user_id),
            name: Set(entry.name.clone()),
            email: Set(entry.email.clone()),
            phone: Set(entry.phone.clone()),
            role: Set(entry.role.clone()),
            position: Set(entry.position),
            is_primary: Set(entry.is_primary),
        }
        .insert(txn)
        .await?;
    }
    for entry in &case.clients {
        case_clients::ActiveModel {
            id: Set(Uuid::now_v7()),
            case_id: Set(case.id),
            user_id: Set(entry.user_id),
            name: Set(entry.name.clone()),
            email: Set(entry.email.clone()),
            phone: Set(entry.phone.clone()),
            role: Set(entry.role.clone()),
            position: Set(entry.position),
            is_primary: Set(entry.is_primary),
        }
        .insert(txn)
        .await?;
    }
    for (side, parties) in [
        (PartySide::Petitioner, &case.parties.petitioner),
        (PartySide::Respondent, &case.parties.respondent),
    ] {
        for (i, party) in parties.iter().enumerate() {
            case_parties::ActiveModel {
                id: Set(Uuid::now_v7()),
                case_id: Set(case.id),
                side: Set(side.as_str().to_owned()),
                name: Set(party.name.clone()),
                entity_type: Set(party.entity_type.clone()),
                role: Set(party.role.clone()),
                email: Set(party.email.clone()),
                phone: Set(party.phone.clone()),
                address: Set(party.address.clone()),
                position: Set(i as i32),
            }
            .insert(txn)
            .await?;
        }
    }
    for advocate in &case.advocates {
        case_advocates::ActiveModel {
            id: Set(Uuid::now_v7()),
            case_id: Set(case.id),
            name: Set(advocate.name.clone()),
            email: Set(advocate.email.clone()),
            phone: Set(advocate.phone.clone()),
            position: Set(advocate.position),
        }
        .insert(txn)
        .await?;
    }
    for stakeholder in &case.stakeholders {
        case_stakeholders::ActiveModel {
            id: Set(Uuid::now_v7()),
            case_id: Set(case.id),
            name: Set(stakeholder.name.clone()),
            role: Set(stakeholder.role.clone()),
            email: Set(stakeholder.email.clone()),
            phone: Set(stakeholder.phone.clone()),
            position: Set(stakeholder.position),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

fn status_from_db(value: &str) -> Result<CaseStatus, CasesServiceError> {
    CaseStatus::parse(value)
        .ok_or_else(|| anyhow::anyhow!("unknown case status `{value}` in storage").into())
}

fn side_from_db(value: &str) -> Result<PartySide, CasesServiceError> {
    PartySide::parse(value)
        .ok_or_else(|| anyhow::anyhow!("unknown party side `{value}` in storage").into())
}

fn assignment_from_model(model: case_lawyers::Model) -> Assignment {
    Assignment {
        user_id: model.user_id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        role: model.role,
        position: model.position,
        is_primary: model.is_primary,
    }
}

fn client_assignment_from_model(model: case_clients::Model) -> Assignment {
    Assignment {
        user_id: model.user_id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        role: model.role,
        position: model.position,
        is_primary: model.is_primary,
    }
}

fn case_from_models(
    model: cases::Model,
    lawyers: Vec<case_lawyers::Model>,
    clients: Vec<case_clients::Model>,
    parties: Vec<case_parties::Model>,
    advocates: Vec<case_advocates::Model>,
    stakeholders: Vec<case_stakeholders::Model>,
) -> Result<Case, CasesServiceError> {
    let mut sides = Parties::default();
    for row in parties {
        let party = Party {
            name: row.name,
            entity_type: row.entity_type,
            role: row.role,
            email: row.email,
            phone: row.phone,
            address: row.address,
        };
        match side_from_db(&row.side)? {
            PartySide::Petitioner => sides.petitioner.push(party),
            PartySide::Respondent => sides.respondent.push(party),
        }
    }
    Ok(Case {
        id: model.id,
        title: model.title,
        case_number: model.case_number,
        case_type: model.case_type,
        status: status_from_db(&model.status)?,
        court: model.court,
        description: model.description,
        is_urgent: model.is_urgent,
        filing_date: model.filing_date,
        hearing_date: model.hearing_date,
        next_hearing_date: model.next_hearing_date,
        lawyer_id: model.lawyer_id,
        client_id: model.client_id,
        lawyers: lawyers.into_iter().map(assignment_from_model).collect(),
        clients: clients
            .into_iter()
            .map(client_assignment_from_model)
            .collect(),
        parties: sides,
        advocates: advocates
            .into_iter()
            .map(|m| Advocate {
                name: m.name,
                email: m.email,
                phone: m.phone,
                position: m.position,
            })
            .collect(),
        stakeholders: stakeholders
            .into_iter()
            .map(|m| Stakeholder {
                name: m.name,
                role: m.role,
                email: m.email,
                phone: m.phone,
                position: m.position,
            })
            .collect(),
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn summary_from_model(model: cases::Model) -> Result<CaseSummary, CasesServiceError> {
    Ok(CaseSummary {
        id: model.id,
        title: model.title,
        case_number: model.case_number,
        case_type: model.case_type,
        status: status_from_db(&model.status)?,
        court: model.court,
        is_urgent: model.is_urgent,
        next_hearing_date: model.next_hearing_date,
        lawyer_id: model.lawyer_id,
        client_id: model.client_id,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Event repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEventRepository {
    pub db: DatabaseConnection,
}

impl EventRepository for DbEventRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, CasesServiceError> {
        let Some(model) = events::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find event by id")?
        else {
            return Ok(None);
        };
        Ok(Some(self.with_participants(model).await?))
    }

    async fn create(&self, event: &Event) -> Result<(), CasesServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    event_row(&event).insert(txn).await?;
                    insert_participants(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create event")?;
        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), CasesServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    event_row(&event).update(txn).await?;
                    event_participants::Entity::delete_many()
                        .filter(event_participants::Column::EventId.eq(event.id))
                        .exec(txn)
                        .await?;
                    insert_participants(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("update event")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CasesServiceError> {
        let result = events::Entity::delete_many()
            .filter(events::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete event")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        viewer: Uuid,
        scope: &CaseScope,
        filter: &EventListFilter,
        page: PageRequest,
    ) -> Result<Vec<Event>, CasesServiceError> {
        let page = page.clamped();
        let mut query = events::Entity::find();
        if let Some(case_ids) = case_ids_in_scope(scope) {
            query = query.filter(
                Condition::any()
                    .add(events::Column::CreatedBy.eq(viewer))
                    .add(
                        events::Column::Id.in_subquery(
                            Query::select()
                                .column(event_participants::Column::EventId)
                                .from(event_participants::Entity)
                                .and_where(
                                    Expr::col(event_participants::Column::UserId).eq(viewer),
                                )
                                .to_owned(),
                        ),
                    )
                    .add(events::Column::CaseId.in_subquery(case_ids)),
            );
        }
        if let Some(case_id) = filter.case_id {
            query = query.filter(events::Column::CaseId.eq(case_id));
        }
        if let Some(event_type) = filter.event_type {
            query = query.filter(events::Column::EventType.eq(event_type.as_str()));
        }
        if let Some(from) = filter.from {
            query = query.filter(events::Column::StartTime.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(events::Column::StartTime.lt(to));
        }
        let models = query
            .order_by_asc(events::Column::StartTime)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list events")?;

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            results.push(self.with_participants(model).await?);
        }
        Ok(results)
    }

    async fn find_scheduled_hearing(
        &self,
        case_id: Uuid,
    ) -> Result<Option<Event>, CasesServiceError> {
        let Some(model) = events::Entity::find()
            .filter(events::Column::CaseId.eq(case_id))
            .filter(events::Column::EventType.eq(EventType::Hearing.as_str()))
            .filter(events::Column::Status.eq(EventStatus::Scheduled.as_str()))
            .order_by_asc(events::Column::StartTime)
            .one(&self.db)
            .await
            .context("find scheduled hearing")?
        else {
            return Ok(None);
        };
        Ok(Some(self.with_participants(model).await?))
    }

    async fn upcoming_hearings(
        &self,
        scope: &CaseScope,
        after: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Event>, CasesServiceError> {
        let mut query = events::Entity::find()
            .filter(events::Column::EventType.eq(EventType::Hearing.as_str()))
            .filter(events::Column::Status.eq(EventStatus::Scheduled.as_str()))
            .filter(events::Column::StartTime.gt(after));
        if let Some(case_ids) = case_ids_in_scope(scope) {
            query = query.filter(events::Column::CaseId.in_subquery(case_ids));
        }
        let models = query
            .order_by_asc(events::Column::StartTime)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list upcoming hearings")?;

        let mut results = Vec::with_capacity(models.len());
        for model in models {
            results.push(self.with_participants(model).await?);
        }
        Ok(results)
    }

    async fn set_participant_status(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: InvitationStatus,
    ) -> Result<bool, CasesServiceError> {
        let result = event_participants::Entity::update_many()
            .filter(event_participants::Column::EventId.eq(event_id))
            .filter(event_participants::Column::UserId.eq(user_id))
            .col_expr(
                event_participants::Column::InvitationStatus,
                Expr::value(status.as_str()),
            )
            .exec(&self.db)
            .await
            .context("set participant invitation status")?;
        Ok(result.rows_affected > 0)
    }
}

impl DbEventRepository {
    async fn with_participants(&self, model: events::Model) -> Result<Event, CasesServiceError> {
        let participants = event_participants::Entity::find()
            .filter(event_participants::Column::EventId.eq(model.id))
            .order_by_asc(event_participants::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("load event participants")?;
        event_from_models(model, participants)
    }
}

fn event_row(event: &Event) -> events::ActiveModel {
    events::ActiveModel {
        id: Set(event.id),
        title: Set(event.title.clone()),
        description: Set(event.description.clone()),
        event_type: Set(event.event_type.as_str().to_owned()),
        status: Set(event.status.as_str().to_owned()),
        priority: Set(event.priority.as_str().to_owned()),
        start_time: Set(event.start_time),
        end_time: Set(event.end_time),
        location: Set(event.location.clone()),
        case_id: Set(event.case_id),
        case_title: Set(event.case_title.clone()),
        case_number: Set(event.case_number.clone()),
        created_by: Set(event.created_by),
        created_at: Set(event.created_at),
        updated_at: Set(event.updated_at),
    }
}

async fn insert_participants(
    txn: &sea_orm::DatabaseTransaction,
    event: &Event,
) -> Result<(), sea_orm::DbErr> {
    for participant in &event.participants {
        event_participants::ActiveModel {
            event_id: Set(event.id),
            user_id: Set(participant.user_id),
            role: Set(participant.role.clone()),
            invitation_status: Set(participant.invitation_status.as_str().to_owned()),
            created_at: Set(Utc::now()),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

fn event_type_from_db(value: &str) -> Result<EventType, CasesServiceError> {
    EventType::parse(value)
        .ok_or_else(|| anyhow::anyhow!("unknown event type `{value}` in storage").into())
}

fn event_status_from_db(value: &str) -> Result<EventStatus, CasesServiceError> {
    EventStatus::parse(value)
        .ok_or_else(|| anyhow::anyhow!("unknown event status `{value}` in storage").into())
}

fn priority_from_db(value: &str) -> Result<EventPriority, CasesServiceError> {
    EventPriority::parse(value)
        .ok_or_else(|| anyhow::anyhow!("unknown event priority `{value}` in storage").into())
}

fn invitation_from_db(value: &str) -> Result<InvitationStatus, CasesServiceError> {
    InvitationStatus::parse(value)
        .ok_or_else(|| anyhow::anyhow!("unknown invitation status `{value}` in storage").into())
}

fn event_from_models(
    model: events::Model,
    participants: Vec<event_participants::Model>,
) -> Result<Event, CasesServiceError> {
    let participants = participants
        .into_iter()
        .map(|p| {
            Ok(Participant {
                user_id: p.user_id,
                role: p.role,
                invitation_status: invitation_from_db(&p.invitation_status)?,
            })
        })
        .collect::<Result<Vec<_>, CasesServiceError>>()?;
    Ok(Event {
        id: model.id,
        title: model.title,
        description: model.description,
        event_type: event_type_from_db(&model.event_type)?,
        status: event_status_from_db(&model.status)?,
        priority: priority_from_db(&model.priority)?,
        start_time: model.start_time,
        end_time: model.end_time,
        location: model.location,
        case_id: model.case_id,
        case_title: model.case_title,
        case_number: model.case_number,
        participants,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Document repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDocumentRepository {
    pub db: DatabaseConnection,
}

impl DocumentRepository for DbDocumentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, CasesServiceError> {
        let Some(model) = documents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find document by id")?
        else {
            return Ok(None);
        };
        Ok(Some(self.with_access(model).await?))
    }

    async fn create(&self, document: &Document) -> Result<(), CasesServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let document = document.clone();
                Box::pin(async move {
                    documents::ActiveModel {
                        id: Set(document.id),
                        case_id: Set(document.case_id),
                        name: Set(document.name.clone()),
                        storage_path: Set(document.storage_path.clone()),
                        url: Set(document.url.clone()),
                        size: Set(document.size),
                        mime_type: Set(document.mime_type.clone()),
                        category: Set(document.category.clone()),
                        uploaded_by: Set(document.uploaded_by),
                        created_at: Set(document.created_at),
                        updated_at: Set(document.updated_at),
                    }
                    .insert(txn)
                    .await?;
                    for grant in &document.access {
                        document_access::ActiveModel {
                            document_id: Set(document.id),
                            user_id: Set(grant.user_id),
                            level: Set(grant.level.as_str().to_owned()),
                            granted_at: Set(grant.granted_at),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create document")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CasesServiceError> {
        let result = documents::Entity::delete_many()
            .filter(documents::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete document")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_case(&self, case_id: Uuid) -> Result<Vec<Document>, CasesServiceError> {
        let models = documents::Entity::find()
            .filter(documents::Column::CaseId.eq(case_id))
            .order_by_desc(documents::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list case documents")?;
        let mut results = Vec::with_capacity(models.len());
        for model in models {
            results.push(self.with_access(model).await?);
        }
        Ok(results)
    }

    async fn grant_access(
        &self,
        document_id: Uuid,
        grant: &AccessGrant,
    ) -> Result<(), CasesServiceError> {
        document_access::Entity::insert(document_access::ActiveModel {
            document_id: Set(document_id),
            user_id: Set(grant.user_id),
            level: Set(grant.level.as_str().to_owned()),
            granted_at: Set(grant.granted_at),
        })
        .on_conflict(
            OnConflict::columns([
                document_access::Column::DocumentId,
                document_access::Column::UserId,
            ])
            .update_columns([
                document_access::Column::Level,
                document_access::Column::GrantedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("upsert document access")?;
        Ok(())
    }

    async fn set_favorite(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        favorite: bool,
    ) -> Result<bool, CasesServiceError> {
        if favorite {
            let inserted = document_favorites::Entity::insert(document_favorites::ActiveModel {
                document_id: Set(document_id),
                user_id: Set(user_id),
                created_at: Set(Utc::now()),
            })
            .on_conflict(
                OnConflict::columns([
                    document_favorites::Column::DocumentId,
                    document_favorites::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("mark document favorite")?;
            Ok(inserted > 0)
        } else {
            let result = document_favorites::Entity::delete_many()
                .filter(document_favorites::Column::DocumentId.eq(document_id))
                .filter(document_favorites::Column::UserId.eq(user_id))
                .exec(&self.db)
                .await
                .context("unmark document favorite")?;
            Ok(result.rows_affected > 0)
        }
    }

    async fn is_favorite(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, CasesServiceError> {
        let found = document_favorites::Entity::find_by_id((document_id, user_id))
            .one(&self.db)
            .await
            .context("check document favorite")?;
        Ok(found.is_some())
    }
}

impl DbDocumentRepository {
    async fn with_access(&self, model: documents::Model) -> Result<Document, CasesServiceError> {
        let grants = document_access::Entity::find()
            .filter(document_access::Column::DocumentId.eq(model.id))
            .order_by_asc(document_access::Column::GrantedAt)
            .all(&self.db)
            .await
            .context("load document access")?;
        document_from_models(model, grants)
    }
}

fn level_from_db(value: &str) -> Result<AccessLevel, CasesServiceError> {
    AccessLevel::parse(value)
        .ok_or_else(|| anyhow::anyhow!("unknown access level `{value}` in storage").into())
}

fn document_from_models(
    model: documents::Model,
    grants: Vec<document_access::Model>,
) -> Result<Document, CasesServiceError> {
    let access = grants
        .into_iter()
        .map(|g| {
            Ok(AccessGrant {
                user_id: g.user_id,
                level: level_from_db(&g.level)?,
                granted_at: g.granted_at,
            })
        })
        .collect::<Result<Vec<_>, CasesServiceError>>()?;
    Ok(Document {
        id: model.id,
        case_id: model.case_id,
        name: model.name,
        storage_path: model.storage_path,
        url: model.url,
        size: model.size,
        mime_type: model.mime_type,
        category: model.category,
        access,
        uploaded_by: model.uploaded_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CasesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), CasesServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            role: Set(user.role.as_str().to_owned()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(CasesServiceError::EmailTaken),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn list(
        &self,
        role: Option<Role>,
        page: PageRequest,
    ) -> Result<Vec<User>, CasesServiceError> {
        let page = page.clamped();
        let mut query = users::Entity::find();
        if let Some(role) = role {
            query = query.filter(users::Column::Role.eq(role.as_str()));
        }
        let models = query
            .order_by_asc(users::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }
}

fn role_from_db(value: &str) -> Result<Role, CasesServiceError> {
    Role::parse(value)
        .ok_or_else(|| anyhow::anyhow!("unknown role `{value}` in storage").into())
}

fn user_from_model(model: users::Model) -> Result<User, CasesServiceError> {
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        role: role_from_db(&model.role)?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
