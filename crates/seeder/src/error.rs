use storage::{error::StorageError, services::password::PasswordError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeedError>;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Password hashing failed: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("GeoDB error {status} for {country}: {body}")]
    UpstreamError {
        status: u16,
        country: String,
        body: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}
