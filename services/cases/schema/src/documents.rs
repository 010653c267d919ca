use sea_orm::entity::prelude::*;

/// Document metadata. The bytes live in the external blob store under
/// `storage_path`; this table never holds file content.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub case_id: Uuid,
    pub name: String,
    pub storage_path: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
    pub category: Option<String>,
    pub uploaded_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cases::Entity",
        from = "Column::CaseId",
        to = "super::cases::Column::Id"
    )]
    Case,
    #[sea_orm(has_many = "super::document_access::Entity")]
    DocumentAccess,
    #[sea_orm(has_many = "super::document_favorites::Entity")]
    DocumentFavorites,
}

impl Related<super::cases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Case.def()
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
