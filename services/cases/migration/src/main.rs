use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(causelist_cases_migration::Migrator).await;
}
