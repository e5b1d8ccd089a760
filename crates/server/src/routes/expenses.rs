use axum::{extract::{Extension, Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use service::expense::domain::{CallerId, CreateExpenseInput, Expense};

use crate::{auth::ServerState, errors::JsonApiError};

#[derive(Debug, Serialize)]
pub struct ExpenseCreated {
    pub success: bool,
    pub data: Expense,
}

#[derive(Debug, Serialize)]
pub struct ExpenseList {
    pub success: bool,
    pub count: usize,
    /// Sum of `amount` over `data`
    pub total: f64,
    pub data: Vec<Expense>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseDeleted {
    pub success: bool,
    pub message: &'static str,
}

#[utoipa::path(
    post, path = "/api/expenses", tag = "expenses",
    request_body = crate::openapi::CreateExpenseRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ExpenseCreatedDoc),
        (status = 400, description = "Malformed JSON body or missing token", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Invalid token", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Missing fields or creation failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(caller): Extension<CallerId>,
    WithRejection(Json(input), _): WithRejection<Json<CreateExpenseInput>, JsonApiError>,
) -> Result<(StatusCode, Json<ExpenseCreated>), JsonApiError> {
    let expense = state.expenses.create(caller, input).await?;
    Ok((StatusCode::CREATED, Json(ExpenseCreated { success: true, data: expense })))
}

#[utoipa::path(
    get, path = "/api/expenses", tag = "expenses",
    responses(
        (status = 200, description = "Caller's expenses, newest first", body = crate::openapi::ExpenseListDoc),
        (status = 422, description = "Fetch failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(caller): Extension<CallerId>,
) -> Result<Json<ExpenseList>, JsonApiError> {
    let data = state.expenses.list(caller).await?;
    let total = data.iter().map(|e| e.amount).sum::<f64>();
    Ok(Json(ExpenseList { success: true, count: data.len(), total, data }))
}

#[utoipa::path(
    delete, path = "/api/expenses/{id}", tag = "expenses",
    params(("id" = String, Path, description = "Expense ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 401, description = "Not the owner", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Delete Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(caller): Extension<CallerId>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseDeleted>, JsonApiError> {
    state.expenses.delete(caller, &id).await?;
    Ok(Json(ExpenseDeleted { success: true, message: "Expense deleted" }))
}
