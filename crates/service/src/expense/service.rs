use std::sync::Arc;

use models::expense::NewExpense;
use tracing::{debug, info, instrument, warn};

use super::domain::{CallerId, CreateExpenseInput, Expense};
use super::errors::ExpenseError;
use super::repository::ExpenseRepository;

/// Expense business service independent of web framework.
///
/// `R` defaults to a trait object so the HTTP state can hold any backend.
pub struct ExpenseService<R: ?Sized = dyn ExpenseRepository> {
    repo: Arc<R>,
}

impl<R: ExpenseRepository + ?Sized> ExpenseService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create an expense owned by `caller`.
    ///
    /// `description`, `amount` and `category` must all be present; otherwise
    /// nothing is written. Storage rejections (unknown category, amount that
    /// does not cast) come back as `CreateFailed`.
    ///
    /// # Examples
    /// ```
    /// use service::expense::{ExpenseService, domain::{CallerId, CreateExpenseInput}};
    /// use service::expense::repository::memory::InMemoryExpenseRepository;
    /// use models::expense::AmountField;
    /// use std::sync::Arc;
    /// let svc = ExpenseService::new(Arc::new(InMemoryExpenseRepository::default()));
    /// let caller = CallerId(uuid::Uuid::new_v4());
    /// let input = CreateExpenseInput {
    ///     description: Some("Coffee".into()),
    ///     amount: Some(AmountField::Number(3.5)),
    ///     category: Some("Food".into()),
    ///     date: None,
    /// };
    /// let expense = tokio_test::block_on(svc.create(caller, input)).unwrap();
    /// assert_eq!(expense.owner, caller.0);
    /// ```
    #[instrument(skip_all, fields(caller = %caller))]
    pub async fn create(&self, caller: CallerId, input: CreateExpenseInput) -> Result<Expense, ExpenseError> {
        let CreateExpenseInput { description, amount, category, date } = input;
        let description = description.filter(|d| !d.trim().is_empty());
        let amount = amount.filter(|a| !a.is_blank());
        let category = category.filter(|c| !c.trim().is_empty());

        let (Some(description), Some(amount), Some(category)) = (description, amount, category) else {
            debug!("expense_create_rejected: missing fields");
            return Err(ExpenseError::missing_fields());
        };

        let new = NewExpense { owner_id: caller.0, description, amount, category, date };
        match self.repo.insert(new).await {
            Ok(expense) => {
                info!(expense_id = %expense.id, category = expense.category.as_str(), "expense_created");
                Ok(expense)
            }
            Err(e) => {
                warn!(error = %e, "expense_create_failed");
                Err(ExpenseError::CreateFailed)
            }
        }
    }

    /// All expenses owned by `caller`, newest `date` first. Empty when there are none.
    #[instrument(skip_all, fields(caller = %caller))]
    pub async fn list(&self, caller: CallerId) -> Result<Vec<Expense>, ExpenseError> {
        let expenses = self.repo.find_by_owner(caller.0).await.map_err(|e| {
            warn!(error = %e, "expense_list_failed");
            ExpenseError::FetchFailed
        })?;
        debug!(count = expenses.len(), "expense_list");
        Ok(expenses)
    }

    /// Delete an expense owned by `caller`.
    ///
    /// Existence is checked before ownership: a caller asking for an id that
    /// does not exist always sees `NotFound`, never `Unauthorized`.
    #[instrument(skip_all, fields(caller = %caller, expense_id = %expense_id))]
    pub async fn delete(&self, caller: CallerId, expense_id: &str) -> Result<(), ExpenseError> {
        let found = self.repo.find_by_id(expense_id).await.map_err(|e| {
            warn!(error = %e, "expense_lookup_failed");
            ExpenseError::DeleteFailed
        })?;
        let Some(expense) = found else {
            return Err(ExpenseError::NotFound);
        };

        if expense.owner != caller.0 {
            warn!(owner = %expense.owner, "expense_delete_denied");
            return Err(ExpenseError::Unauthorized);
        }

        self.repo.delete(&expense).await.map_err(|e| {
            warn!(error = %e, "expense_delete_failed");
            ExpenseError::DeleteFailed
        })?;
        info!(expense_id = %expense.id, "expense_deleted");
        Ok(())
    }
}
