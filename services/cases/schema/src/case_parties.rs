use sea_orm::entity::prelude::*;

/// Named party on one side of a case. Contact columns default to the empty
/// string rather than NULL so every row reads back uniformly.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "case_parties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub case_id: Uuid,
    /// `petitioner` or `respondent`.
    pub side: String,
    pub name: String,
    /// `individual` or `organization`.
    pub entity_type: String,
    /// Side-constrained label (Petitioner/Appellant/... vs Respondent/Accused/...).
    pub role: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cases::Entity",
        from = "Column::CaseId",
        to = "super::cases::Column::Id"
    )]
    Case,
}

impl Related<super::cases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Case.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
