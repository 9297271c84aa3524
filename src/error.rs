// ABOUTME: Centralized error taxonomy mapped onto HTTP responses
// ABOUTME: Authorization, conflict, validation, transaction, and referential failures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Bad or missing origin, invalid or expired session. Rejected before
    /// any store access.
    Unauthorized(String),
    /// Unique constraint hit (email, token, sku). Surfaced, not retried.
    Conflict(String),
    /// Bad input caught before mutation: negative stock, invalid enum
    /// transition, malformed composite reference.
    Validation(String),
    /// Stock shortfall or concurrent-update conflict; the whole operation
    /// rolled back and the caller may retry with current data.
    Transaction(String),
    /// Foreign reference to a missing parent; never auto-created.
    NotFound(String),
    Database(DbErr),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Transaction(msg) => write!(f, "Transaction aborted: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Database(err) => write!(f, "Database error: {}", err),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                (StatusCode::CONFLICT, msg.clone())
            }
            AppError::Validation(msg) => {
                tracing::info!("Validation failure: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }
            AppError::Transaction(msg) => {
                tracing::info!("Transaction aborted: {}", msg);
                (StatusCode::CONFLICT, msg.clone())
            }
            AppError::NotFound(msg) => {
                tracing::info!("Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            AppError::Database(_) => {
                tracing::error!("Database error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                )
            }
            AppError::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl AppError {
    /// Classify a database error from a write path: unique violations are
    /// caller-visible conflicts, foreign-key violations mean the referenced
    /// parent does not exist.
    pub fn from_write(err: DbErr, what: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(format!("{} already exists", what))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::NotFound(format!("referenced {} does not exist", what))
            }
            _ => AppError::Database(err),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("Invalid UUID: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
