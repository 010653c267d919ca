use sea_orm::entity::prelude::*;

/// Case root record. Party/assignment rows live in the child tables and are
/// replaced wholesale when the aggregate is saved.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub case_number: String,
    pub case_type: String,
    /// One of `draft` / `active` / `inactive` / `closed` / `archived` / `pending`.
    pub status: String,
    pub court: Option<String>,
    pub description: Option<String>,
    pub is_urgent: bool,
    pub filing_date: chrono::NaiveDate,
    pub hearing_date: chrono::DateTime<chrono::Utc>,
    pub next_hearing_date: Option<chrono::DateTime<chrono::Utc>>,
    /// Primary lawyer; mirrors the `is_primary` row in `case_lawyers`.
    pub lawyer_id: Option<Uuid>,
    /// Primary client; mirrors the `is_primary` row in `case_clients`.
    pub client_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::case_lawyers::Entity")]
    CaseLawyers,
    #[sea_orm(has_many = "super::case_clients::Entity")]
    CaseClients,
    #[sea_orm(has_many = "super::case_parties::Entity")]
    CaseParties,
    #[sea_orm(has_many = "super::case_advocates::Entity")]
    CaseAdvocates,
    #[sea_orm(has_many = "super::case_stakeholders::Entity")]
    CaseStakeholders,
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
    #[sea_orm(has_many = "super::documents::Entity")]
    Documents,
}

impl Related<super::case_lawyers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseLawyers.def()
    }
}

impl Related<super::case_clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseClients.def()
    }
}

impl Related<super::case_parties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseParties.def()
    }
}

impl Related<super::case_advocates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseAdvocates.def()
    }
}

impl Related<super::case_stakeholders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseStakeholders.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
