use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use storage::{error::StorageError, services::password::PasswordError};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    AuthRequired,
    InvalidCredentials,
    UserNotFound,
    Unauthorized,
    Forbidden,
    NotFound,
    ValidationError,
    InternalError,
    ServiceUnavailable,
    RateLimit,
    Conflict,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            Self::AuthRequired | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ValidationError => StatusCode::BAD_REQUEST,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            Self::Conflict => StatusCode::CONFLICT,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: ErrorCode,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Api {
        code: ErrorCode,
        message: String,
        context: Option<Value>,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
            context: None,
        }
    }

    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, "Invalid email or password")
    }

    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, "User not found")
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("{resource} not found"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn validation_with(message: impl Into<String>, context: Value) -> Self {
        Self::Api {
            code: ErrorCode::ValidationError,
            message: message.into(),
            context: Some(context),
        }
    }

    /// The message is logged but never sent to the client.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn service_unavailable() -> Self {
        Self::new(ErrorCode::ServiceUnavailable, "Service temporarily unavailable")
    }

    pub fn rate_limit() -> Self {
        Self::new(
            ErrorCode::RateLimit,
            "Too many requests. Please try again later.",
        )
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Api { code, .. } => *code,
            Self::Storage(StorageError::NotFound) => ErrorCode::NotFound,
            Self::Storage(StorageError::ConstraintViolation(_)) => ErrorCode::Conflict,
            Self::Storage(StorageError::InvalidReference(_)) => ErrorCode::ValidationError,
            Self::Storage(_) => ErrorCode::InternalError,
            Self::Validation(_) => ErrorCode::ValidationError,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.code().status()
    }

    /// Builds the client-facing body and logs the error: 5xx at `error`,
    /// everything else at `warn`.
    pub fn to_error_response(&self) -> ErrorResponse {
        let code = self.code();
        let status = code.status();

        let (message, context) = match self {
            Self::Api {
                message, context, ..
            } => (message.clone(), context.clone()),
            Self::Storage(StorageError::NotFound) => ("Resource not found".to_string(), None),
            Self::Storage(StorageError::ConstraintViolation(msg))
            | Self::Storage(StorageError::InvalidReference(msg)) => (msg.clone(), None),
            Self::Storage(_) => (INTERNAL_MESSAGE.to_string(), None),
            Self::Validation(errors) => (
                "Validation failed".to_string(),
                Some(json!({ "details": validation_details(errors) })),
            ),
        };

        if status.is_server_error() {
            tracing::error!(code = ?code, status = status.as_u16(), "{}", self);
        } else {
            tracing::warn!(code = ?code, status = status.as_u16(), "{}", message);
        }

        let message = if code == ErrorCode::InternalError {
            INTERNAL_MESSAGE.to_string()
        } else {
            message
        };

        ErrorResponse {
            error: message,
            code,
            status: status.as_u16(),
            context: if code == ErrorCode::InternalError {
                None
            } else {
                context
            },
        }
    }
}

/// `field: message` entries, sorted by field name.
fn validation_details(errors: &ValidationErrors) -> Vec<String> {
    let mut details: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();

    details.sort();
    details
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = self.to_error_response();
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PasswordError> for AppError {
    fn from(error: PasswordError) -> Self {
        Self::internal(format!("Password hashing failed: {error}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::internal(format!("Upstream request failed: {error}"))
    }
}

pub type ApiResult<T> = Result<T, AppError>;
