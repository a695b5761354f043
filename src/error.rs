use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Errors surfaced by the analytics core and its store adapters.
///
/// Every variant maps to a distinct HTTP status so callers can tell them apart;
/// nothing is retried or swallowed here.
#[derive(Debug, Display)]
pub enum AnalyticsError {
    #[display(fmt = "{} {} not found", entity, id)]
    NotFound { entity: &'static str, id: u64 },

    #[display(fmt = "validation failed: {}", _0)]
    Validation(String),

    #[display(fmt = "invalid visit transition: {}", _0)]
    InvalidTransition(String),

    #[display(fmt = "store failure: {}", _0)]
    Upstream(String),
}

impl std::error::Error for AnalyticsError {}

impl AnalyticsError {
    pub fn visit_not_found(id: u64) -> Self {
        AnalyticsError::NotFound { entity: "visit", id }
    }

    pub fn user_not_found(id: u64) -> Self {
        AnalyticsError::NotFound { entity: "user", id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AnalyticsError::Validation(message.into())
    }
}

impl From<sqlx::Error> for AnalyticsError {
    fn from(e: sqlx::Error) -> Self {
        AnalyticsError::Upstream(e.to_string())
    }
}

impl ResponseError for AnalyticsError {
    fn status_code(&self) -> StatusCode {
        match self {
            AnalyticsError::NotFound { .. } => StatusCode::NOT_FOUND,
            AnalyticsError::Validation(_) => StatusCode::BAD_REQUEST,
            AnalyticsError::InvalidTransition(_) => StatusCode::CONFLICT,
            AnalyticsError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AnalyticsError::Upstream(e) => {
                tracing::error!(error = %e, "Store operation failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
