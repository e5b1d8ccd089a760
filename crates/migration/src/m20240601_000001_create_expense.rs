//! Create `expense` table.
//!
//! One row per expense record. `owner_id` is the caller identity taken from the
//! bearer token; users live in an external identity store, so there is no FK.
use sea_orm_migration::{prelude::*, schema::*};

pub const CATEGORIES: [&str; 5] = ["Food", "Transport", "Utilities", "Entertainment", "Other"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expense::Table)
                    .if_not_exists()
                    .col(uuid(Expense::Id).primary_key())
                    .col(text(Expense::Description).not_null())
                    .col(double(Expense::Amount).not_null())
                    .col(
                        string_len(Expense::Category, 32)
                            .not_null()
                            .check(Expr::col(Expense::Category).is_in(CATEGORIES)),
                    )
                    .col(timestamp_with_time_zone(Expense::Date).not_null())
                    .col(uuid(Expense::OwnerId).not_null())
                    .col(timestamp_with_time_zone(Expense::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Expense::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Expense::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Expense {
    Table,
    Id,
    Description,
    Amount,
    Category,
    Date,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}
