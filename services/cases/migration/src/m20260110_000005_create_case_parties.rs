use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseParties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseParties::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseParties::CaseId).uuid().not_null())
                    .col(ColumnDef::new(CaseParties::Side).string().not_null())
                    .col(ColumnDef::new(CaseParties::Name).string().not_null())
                    .col(
                        ColumnDef::new(CaseParties::EntityType)
                            .string()
                            .not_null()
                            .default("individual"),
                    )
                    .col(ColumnDef::new(CaseParties::Role).string().not_null())
                    .col(
                        ColumnDef::new(CaseParties::Email)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseParties::Phone)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseParties::Address)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseParties::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CaseParties::Table, CaseParties::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseParties::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CaseParties {
    Table,
    Id,
    CaseId,
    Side,
    Name,
    EntityType,
    Role,
    Email,
    Phone,
    Address,
    Position,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
}
