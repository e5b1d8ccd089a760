use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDoc {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    /// One of Food, Transport, Utilities, Entertainment, Other
    pub category: String,
    pub date: DateTime<Utc>,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(ToSchema)]
pub struct CreateExpenseRequest {
    pub description: String,
    /// Number, or a numeric string
    pub amount: f64,
    pub category: String,
    /// Defaults to the time of creation
    pub date: Option<DateTime<Utc>>,
}

#[derive(ToSchema)]
pub struct ExpenseCreatedDoc { pub success: bool, pub data: ExpenseDoc }

#[derive(ToSchema)]
pub struct ExpenseListDoc {
    pub success: bool,
    pub count: usize,
    pub total: f64,
    pub data: Vec<ExpenseDoc>,
}

#[derive(ToSchema)]
pub struct MessageDoc { pub success: bool, pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub success: bool, pub message: String, pub status: u16 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::expenses::create,
        crate::routes::expenses::list,
        crate::routes::expenses::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ExpenseDoc,
            CreateExpenseRequest,
            ExpenseCreatedDoc,
            ExpenseListDoc,
            MessageDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "expenses")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_expense_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/api/expenses"));
        assert!(paths.contains_key("/api/expenses/{id}"));
        assert!(doc["components"]["schemas"]["ExpenseListDoc"].is_object());
    }
}
