use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing is always "by owner, newest date first"
        manager
            .create_index(
                Index::create()
                    .name("idx_expense_owner_date")
                    .table(Expense::Table)
                    .col(Expense::OwnerId)
                    .col(Expense::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_expense_owner_date").table(Expense::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Expense { Table, OwnerId, Date }
