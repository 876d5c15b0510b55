//! Create `global_counter` table.
//!
//! Holds a single row addressed by `id = 1`; `value` never goes negative.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GlobalCounter::Table)
                    .if_not_exists()
                    .col(pk_auto(GlobalCounter::Id))
                    .col(
                        integer(GlobalCounter::Value)
                            .default(0)
                            .check(Expr::col(GlobalCounter::Value).gte(0)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(GlobalCounter::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum GlobalCounter { Table, Id, Value }
