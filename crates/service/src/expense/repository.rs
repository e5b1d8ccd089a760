use async_trait::async_trait;
use models::errors::ModelError;
use models::expense::NewExpense;
use uuid::Uuid;

use super::domain::Expense;

/// Repository abstraction over the expense store.
///
/// Implementations apply `models::expense::prepare` on insert, so enum and
/// cast failures surface as `ModelError::Validation` from every backend.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn insert(&self, new: NewExpense) -> Result<Expense, ModelError>;
    /// Owned by `owner`, newest `date` first.
    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Expense>, ModelError>;
    /// `id` is client-supplied text; a malformed id is a validation error, not a miss.
    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, ModelError>;
    async fn delete(&self, expense: &Expense) -> Result<(), ModelError>;
}

/// In-memory repository for tests and local runs without a database.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use models::expense::{self, Model};
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryExpenseRepository {
        rows: RwLock<HashMap<Uuid, Model>>, // key: expense id
    }

    impl InMemoryExpenseRepository {
        pub fn new() -> Self { Self::default() }

        /// Number of stored expenses across all owners.
        pub async fn len(&self) -> usize {
            self.rows.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.rows.read().await.is_empty()
        }
    }

    #[async_trait]
    impl ExpenseRepository for InMemoryExpenseRepository {
        async fn insert(&self, new: NewExpense) -> Result<Expense, ModelError> {
            let row = expense::prepare(new)?;
            let mut rows = self.rows.write().await;
            rows.insert(row.id, row.clone());
            Ok(row.into())
        }

        async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Expense>, ModelError> {
            let rows = self.rows.read().await;
            let mut owned: Vec<Model> = rows.values().filter(|m| m.owner_id == owner).cloned().collect();
            expense::sort_newest_first(&mut owned);
            Ok(owned.into_iter().map(Expense::from).collect())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, ModelError> {
            let id = expense::parse_id(id)?;
            let rows = self.rows.read().await;
            Ok(rows.get(&id).cloned().map(Expense::from))
        }

        async fn delete(&self, expense: &Expense) -> Result<(), ModelError> {
            let mut rows = self.rows.write().await;
            rows.remove(&expense.id);
            Ok(())
        }
    }
}
