use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// The requested title is not in the index. No close-match guessing is done.
    #[error("Title not found: {0}")]
    NotFound(String),

    #[error("Catalog is empty, nothing to index")]
    EmptyCatalog,

    /// An upstream guarantee was broken (duplicate key after merge, map/index desync)
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Ambiguous title: {0}")]
    AmbiguousTitle(String),

    #[error("Catalog parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(title) => {
                (StatusCode::NOT_FOUND, format!("No such title: {}", title))
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::EmptyCatalog => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AppError::InvariantViolation(_)
            | AppError::AmbiguousTitle(_)
            | AppError::Csv(_)
            | AppError::Io(_)
            | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
