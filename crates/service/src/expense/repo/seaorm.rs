use models::errors::ModelError;
use models::expense::{self, NewExpense};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::expense::domain::Expense;
use crate::expense::repository::ExpenseRepository;

pub struct SeaOrmExpenseRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ExpenseRepository for SeaOrmExpenseRepository {
    async fn insert(&self, new: NewExpense) -> Result<Expense, ModelError> {
        let created = expense::insert(&self.db, new).await?;
        Ok(created.into())
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Expense>, ModelError> {
        let rows = expense::find_by_owner(&self.db, owner).await?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, ModelError> {
        let id = expense::parse_id(id)?;
        let found = expense::find_by_id(&self.db, id).await?;
        Ok(found.map(Expense::from))
    }

    async fn delete(&self, expense: &Expense) -> Result<(), ModelError> {
        expense::delete(&self.db, expense.id).await
    }
}
