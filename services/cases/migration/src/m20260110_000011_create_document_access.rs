use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DocumentAccess::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentAccess::DocumentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentAccess::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(DocumentAccess::Level)
                            .string()
                            .not_null()
                            .default("view"),
                    )
                    .col(
                        ColumnDef::new(DocumentAccess::GrantedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(DocumentAccess::DocumentId)
                            .col(DocumentAccess::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DocumentAccess::Table, DocumentAccess::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DocumentAccess::Table, DocumentAccess::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentAccess::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DocumentAccess {
    Table,
    DocumentId,
    UserId,
    Level,
    GrantedAt,
}

#[derive(Iden)]
enum Documents {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
