use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cases::Title).string().not_null())
                    .col(
                        ColumnDef::new(Cases::CaseNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Cases::CaseType).string().not_null())
                    .col(ColumnDef::new(Cases::Status).string().not_null())
                    .col(ColumnDef::new(Cases::Court).string())
                    .col(ColumnDef::new(Cases::Description).string())
                    .col(
                        ColumnDef::new(Cases::IsUrgent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Cases::FilingDate).date().not_null())
                    .col(
                        ColumnDef::new(Cases::HearingDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Cases::NextHearingDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Cases::LawyerId).uuid())
                    .col(ColumnDef::new(Cases::ClientId).uuid())
                    .col(ColumnDef::new(Cases::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Cases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cases::Table, Cases::LawyerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cases::Table, Cases::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cases::Table, Cases::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cases::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
    Title,
    CaseNumber,
    CaseType,
    Status,
    Court,
    Description,
    IsUrgent,
    FilingDate,
    HearingDate,
    NextHearingDate,
    LawyerId,
    ClientId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
