//! Application error handling
//!
//! Services return [`AppError`]. The CLI turns it into a message on stderr and
//! a process exit code; the code string is stable for scripts that parse
//! `--json` output.

use happy_kitty_shared::CoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Error body printed in JSON mode
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Csv(_) => "CSV_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Process exit code (sysexits-style)
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) => 65,
            AppError::NotFound(_) => 66,
            AppError::Storage(_) => 74,
            AppError::Serialization(_) | AppError::Csv(_) => 70,
            AppError::Config(_) => 78,
            AppError::Internal(_) => 70,
        }
    }

    /// Message safe to show the user
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AppError::Validation(msg),
            other => AppError::Validation(other.to_string()),
        }
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
