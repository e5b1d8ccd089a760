//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_expense;
mod m20240601_000002_add_expense_indexes;

pub use m20240601_000001_create_expense::CATEGORIES;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_expense::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000002_add_expense_indexes::Migration),
        ]
    }
}
