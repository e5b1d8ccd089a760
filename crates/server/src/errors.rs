use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::expense::errors::ExpenseError;
use thiserror::Error;
use tracing::{debug, warn};

/// Error body shared by every JSON endpoint: `{success: false, message, status}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    pub fn unauthorized(message: impl Into<String>) -> Self { Self::new(StatusCode::UNAUTHORIZED, message) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "message": self.message,
            "status": self.status.as_u16(),
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ExpenseError> for JsonApiError {
    fn from(e: ExpenseError) -> Self {
        let status = match e {
            ExpenseError::NotFound => StatusCode::NOT_FOUND,
            ExpenseError::Unauthorized => StatusCode::UNAUTHORIZED,
            ExpenseError::Validation(_)
            | ExpenseError::CreateFailed
            | ExpenseError::FetchFailed
            | ExpenseError::DeleteFailed => StatusCode::UNPROCESSABLE_ENTITY,
        };
        debug!(code = e.code(), status = status.as_u16(), "expense error mapped");
        Self::new(status, e.to_string())
    }
}

pub const MALFORMED_BODY: &str = "Malformed JSON body";

// 只有创建接口接收 JSON 请求体：
// 非 JSON 文本返回 400；字段类型不符视为创建失败 (422)；缺少 Content-Type 视为字段缺失
// serde 的错误细节只写日志，不返回给客户端
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(e) => {
                warn!(error = %e.body_text(), "request body is not valid JSON");
                Self::bad_request(MALFORMED_BODY)
            }
            JsonRejection::MissingJsonContentType(_) => {
                warn!("request body without JSON content type treated as empty");
                ExpenseError::missing_fields().into()
            }
            other => {
                warn!(error = %other.body_text(), "request body has unexpected field types");
                ExpenseError::CreateFailed.into()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
