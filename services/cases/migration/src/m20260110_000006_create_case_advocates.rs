use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseAdvocates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseAdvocates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseAdvocates::CaseId).uuid().not_null())
                    .col(ColumnDef::new(CaseAdvocates::Name).string().not_null())
                    .col(
                        ColumnDef::new(CaseAdvocates::Email)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseAdvocates::Phone)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseAdvocates::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CaseAdvocates::Table, CaseAdvocates::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseAdvocates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CaseAdvocates {
    Table,
    Id,
    CaseId,
    Name,
    Email,
    Phone,
    Position,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
}
