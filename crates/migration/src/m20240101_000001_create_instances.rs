//! Create `instances` table.
//!
//! One row per live instance; only the persisted subset of the record is kept.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Instances::Table)
                    .if_not_exists()
                    .col(string(Instances::InstanceId).primary_key())
                    .col(string(Instances::EventName))
                    .col(string_null(Instances::Name))
                    .col(string_null(Instances::Result))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Instances::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Instances { Table, InstanceId, EventName, Name, Result }
