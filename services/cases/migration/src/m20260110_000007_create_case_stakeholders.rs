use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseStakeholders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseStakeholders::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseStakeholders::CaseId).uuid().not_null())
                    .col(ColumnDef::new(CaseStakeholders::Name).string().not_null())
                    .col(
                        ColumnDef::new(CaseStakeholders::Role)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseStakeholders::Email)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseStakeholders::Phone)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseStakeholders::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CaseStakeholders::Table, CaseStakeholders::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseStakeholders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CaseStakeholders {
    Table,
    Id,
    CaseId,
    Name,
    Role,
    Email,
    Phone,
    Position,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
}
