//! Error handling for SignMeUp
//!
//! This module defines the main error type used by the service, the API client
//! and the views, plus the JSON error body exchanged between them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for SignMeUp application
#[derive(Error, Debug)]
pub enum SignMeUpError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Event with ID {event_id} not found")]
    EventNotFound { event_id: String },

    #[error("Group with ID {group_id} not found")]
    GroupNotFound { group_id: i64 },

    #[error("Member with ID {member_id} not found")]
    MemberNotFound { member_id: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("Event has reached its maximum participant limit of {limit}")]
    CapacityExceeded { limit: i32 },

    #[error("Group size limit of {limit} exceeded")]
    GroupSizeExceeded { limit: i32 },

    #[error("Group with ID {group_id} does not accept new members")]
    GroupClosed { group_id: i64 },

    /// Error returned by the registration API, carrying its status and message
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for SignMeUp operations
pub type Result<T> = std::result::Result<T, SignMeUpError>;

/// JSON body sent by the service for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorDetail {
    pub status: u16,
    pub message: String,
}

impl SignMeUpError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            SignMeUpError::Database(_) => false,
            SignMeUpError::Migration(_) => false,
            SignMeUpError::Config(_) => false,
            SignMeUpError::ConfigLoad(_) => false,
            SignMeUpError::EventNotFound { .. } => false,
            SignMeUpError::GroupNotFound { .. } => false,
            SignMeUpError::MemberNotFound { .. } => false,
            SignMeUpError::Validation(_) => true,
            SignMeUpError::CapacityExceeded { .. } => true,
            SignMeUpError::GroupSizeExceeded { .. } => true,
            SignMeUpError::GroupClosed { .. } => false,
            SignMeUpError::Api { status, .. } => *status < 500,
            SignMeUpError::Http(_) => true,
            SignMeUpError::Serialization(_) => false,
            SignMeUpError::Io(_) => true,
            SignMeUpError::UrlParse(_) => false,
            SignMeUpError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SignMeUpError::Database(_) => ErrorSeverity::Critical,
            SignMeUpError::Migration(_) => ErrorSeverity::Critical,
            SignMeUpError::Config(_) => ErrorSeverity::Critical,
            SignMeUpError::ConfigLoad(_) => ErrorSeverity::Critical,
            SignMeUpError::Validation(_) => ErrorSeverity::Info,
            SignMeUpError::InvalidInput(_) => ErrorSeverity::Info,
            SignMeUpError::CapacityExceeded { .. } => ErrorSeverity::Warning,
            SignMeUpError::GroupSizeExceeded { .. } => ErrorSeverity::Warning,
            SignMeUpError::GroupClosed { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status the service answers with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SignMeUpError::EventNotFound { .. }
            | SignMeUpError::GroupNotFound { .. }
            | SignMeUpError::MemberNotFound { .. } => StatusCode::NOT_FOUND,
            SignMeUpError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SignMeUpError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SignMeUpError::CapacityExceeded { .. }
            | SignMeUpError::GroupSizeExceeded { .. }
            | SignMeUpError::GroupClosed { .. } => StatusCode::CONFLICT,
            SignMeUpError::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text suitable for showing to the person who triggered the failure.
    ///
    /// API errors yield the server's message verbatim so callers can match on it.
    pub fn user_message(&self) -> String {
        match self {
            SignMeUpError::Api { message, .. } => message.clone(),
            SignMeUpError::Http(e) if e.is_timeout() => {
                "The request timed out. Please try again.".to_string()
            }
            SignMeUpError::Http(e) if e.is_connect() => {
                "Could not reach the server. Please check your connection.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for SignMeUpError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, severity = %self.severity(), "Request failed with server error");
            match self {
                SignMeUpError::Database(_) | SignMeUpError::Migration(_) => {
                    "Database error occurred".to_string()
                }
                _ => "Internal server error".to_string(),
            }
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
            self.to_string()
        };

        let body = ApiErrorBody {
            error: ApiErrorDetail {
                status: status.as_u16(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
