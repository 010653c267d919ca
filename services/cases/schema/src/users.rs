use sea_orm::entity::prelude::*;

/// User profile record. Email is unique and immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    /// One of `client` / `lawyer` / `admin`.
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_participants::Entity")]
    EventParticipants,
    #[sea_orm(has_many = "super::document_access::Entity")]
    DocumentAccess,
    #[sea_orm(has_many = "super::document_favorites::Entity")]
    DocumentFavorites,
}

impl Related<super::event_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventParticipants.def()
    }
}

impl Related<super::document_access::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentAccess.def()
    }
}

impl Related<super::document_favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentFavorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
