use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseClients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseClients::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseClients::CaseId).uuid().not_null())
                    .col(ColumnDef::new(CaseClients::UserId).uuid())
                    .col(
                        ColumnDef::new(CaseClients::Name)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseClients::Email)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseClients::Phone)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseClients::Role)
                            .string()
                            .not_null()
                            .default("primary"),
                    )
                    .col(
                        ColumnDef::new(CaseClients::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CaseClients::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CaseClients::Table, CaseClients::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CaseClients::Table, CaseClients::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseClients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CaseClients {
    Table,
    Id,
    CaseId,
    UserId,
    Name,
    Email,
    Phone,
    Role,
    Position,
    IsPrimary,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
