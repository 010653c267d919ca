use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DocumentFavorites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentFavorites::DocumentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentFavorites::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(DocumentFavorites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(DocumentFavorites::DocumentId)
                            .col(DocumentFavorites::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DocumentFavorites::Table, DocumentFavorites::DocumentId)
                            .to(Documents::Table, Documents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DocumentFavorites::Table, DocumentFavorites::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DocumentFavorites::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DocumentFavorites {
    Table,
    DocumentId,
    UserId,
    CreatedAt,
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
