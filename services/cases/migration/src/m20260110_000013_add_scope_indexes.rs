use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Visibility-scope filters hit these columns on every list request.
        manager
            .create_index(
                Index::create()
                    .table(Cases::Table)
                    .col(Cases::LawyerId)
                    .name("idx_cases_lawyer_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Cases::Table)
                    .col(Cases::ClientId)
                    .name("idx_cases_client_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CaseLawyers::Table)
                    .col(CaseLawyers::CaseId)
                    .name("idx_case_lawyers_case_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CaseLawyers::Table)
                    .col(CaseLawyers::UserId)
                    .name("idx_case_lawyers_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CaseClients::Table)
                    .col(CaseClients::CaseId)
                    .name("idx_case_clients_case_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CaseClients::Table)
                    .col(CaseClients::UserId)
                    .name("idx_case_clients_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CaseParties::Table)
                    .col(CaseParties::CaseId)
                    .name("idx_case_parties_case_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Events::Table)
                    .col(Events::CaseId)
                    .name("idx_events_case_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Events::Table)
                    .col(Events::StartTime)
                    .name("idx_events_start_time")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Documents::Table)
                    .col(Documents::CaseId)
                    .name("idx_documents_case_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_documents_case_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_events_start_time").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_events_case_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_case_parties_case_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_case_clients_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_case_clients_case_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_case_lawyers_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_case_lawyers_case_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cases_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cases_lawyer_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cases {
    Table,
    LawyerId,
    ClientId,
}

#[derive(Iden)]
enum CaseLawyers {
    Table,
    CaseId,
    UserId,
}

#[derive(Iden)]
enum CaseClients {
    Table,
    CaseId,
    UserId,
}

#[derive(Iden)]
enum CaseParties {
    Table,
    CaseId,
}

#[derive(Iden)]
enum Events {
    Table,
    CaseId,
    StartTime,
}

#[derive(Iden)]
enum Documents {
    Table,
    CaseId,
}
