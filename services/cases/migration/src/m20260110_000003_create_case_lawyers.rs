use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseLawyers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseLawyers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseLawyers::CaseId).uuid().not_null())
                    .col(ColumnDef::new(CaseLawyers::UserId).uuid())
                    .col(
                        ColumnDef::new(CaseLawyers::Name)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseLawyers::Email)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseLawyers::Phone)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseLawyers::Role)
                            .string()
                            .not_null()
                            .default("lead"),
                    )
                    .col(
                        ColumnDef::new(CaseLawyers::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CaseLawyers::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CaseLawyers::Table, CaseLawyers::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CaseLawyers::Table, CaseLawyers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseLawyers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CaseLawyers {
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
