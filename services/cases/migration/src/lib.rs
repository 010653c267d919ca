use sea_orm_migration::prelude::*;

mod m20260110_000001_create_users;
mod m20260110_000002_create_cases;
mod m20260110_000003_create_case_lawyers;
mod m20260110_000004_create_case_clients;
mod m20260110_000005_create_case_parties;
mod m20260110_000006_create_case_advocates;
mod m20260110_000007_create_case_stakeholders;
mod m20260110_000008_create_events;
mod m20260110_000009_create_event_participants;
mod m20260110_000010_create_documents;
mod m20260110_000011_create_document_access;
mod m20260110_000012_create_document_favorites;
mod m20260110_000013_add_scope_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_users::Migration),
            Box::new(m20260110_000002_create_cases::Migration),
            Box::new(m20260110_000003_create_case_lawyers::Migration),
            Box::new(m20260110_000004_create_case_clients::Migration),
            Box::new(m20260110_000005_create_case_parties::Migration),
            Box::new(m20260110_000006_create_case_advocates::Migration),
            Box::new(m20260110_000007_create_case_stakeholders::Migration),
            Box::new(m20260110_000008_create_events::Migration),
            Box::new(m20260110_000009_create_event_participants::Migration),
            Box::new(m20260110_000010_create_documents::Migration),
            Box::new(m20260110_000011_create_document_access::Migration),
            Box::new(m20260110_000012_create_document_favorites::Migration),
            Box::new(m20260110_000013_add_scope_indexes::Migration),
        ]
    }
}
