//! # HTTP Error Mapping
//!
//! [`ApiError`] is the only place where failures become HTTP responses:
//! - Returns the status code matching the failure
//! - Sends a sanitized `{"message": "..."}` body
//! - Logs internal details (database errors, diagnostics) through `tracing`
//!
//! Services raise typed [`ServiceError`]s. The controller converts them with
//! [`ApiError::from_service_error`], which also translates the messages of
//! translatable errors; the plain `From<ServiceError>` conversion keeps the
//! diagnostic message instead.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pagination::PaginationError;
use crate::service::errors::ServiceError;
use crate::translation::Translator;

/// API error type with automatic logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found - Resource doesn't exist
    NotFound { message: String },

    /// 400 Bad Request - Invalid input from user
    BadRequest { message: String },

    /// 409 Conflict - Resource conflict (e.g., duplicate key)
    Conflict { message: String },

    /// 400 Bad Request - Request body violates its constraints
    ValidationFailed { errors: Vec<String> },

    /// 500 Internal Server Error - Database error (details logged, not exposed)
    Database {
        message: String,
        internal: DbErr,
    },

    /// 500 Internal Server Error - Generic internal error
    Internal {
        message: String,
        internal: Option<String>,
    },

    /// Custom error with specific status code
    Custom {
        status: StatusCode,
        message: String,
        internal: Option<String>,
    },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        let resource = resource.into();
        let message = match id {
            Some(id) => format!("{resource} with ID '{id}' not found"),
            None => format!("{resource} not found"),
        };
        Self::NotFound { message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    /// The database error details are logged but NOT sent to the user.
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    pub fn custom(status: StatusCode, message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Custom {
            status,
            message: message.into(),
            internal,
        }
    }

    /// Map a service failure, translating its user-facing message.
    pub fn from_service_error(err: ServiceError, translator: &dyn Translator, domain: &str) -> Self {
        let translated = err
            .translation()
            .map(|(key, parameters)| translator.trans(key, &parameters, domain));
        let Some(message) = translated else {
            return err.into();
        };
        let diagnostic = err.to_string();

        match err {
            ServiceError::AlreadyExists(_) => Self::Conflict { message },
            ServiceError::NotFound(_) => Self::NotFound { message },
            ServiceError::Translatable(inner) => Self::Custom {
                status: inner.status,
                message,
                internal: Some(diagnostic),
            },
            other => other.into(),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Custom { status, .. } => *status,
        }
    }

    /// Get the user-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
            Self::NotFound { message }
            | Self::BadRequest { message }
            | Self::Conflict { message }
            | Self::Database { message, .. }
            | Self::Internal { message, .. }
            | Self::Custom { message, .. } => message.clone(),
        }
    }

    /// Log internal error details (not sent to user)
    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::Internal {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "Internal error occurred");
            }
            Self::Custom {
                internal: Some(details),
                status,
                ..
            } => {
                tracing::warn!(status = %status, details = %details, "Request rejected");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// Error body sent to users
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let body = ErrorResponse {
            message: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// `DbErr::RecordNotFound` → 404, everything else → 500
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(msg) => Self::NotFound {
                message: msg.clone(),
            },
            _ => Self::database(err),
        }
    }
}

impl From<PaginationError> for ApiError {
    fn from(err: PaginationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

/// Untranslated mapping: the diagnostic message is sent as is
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::AlreadyExists(inner) => Self::conflict(inner.to_string()),
            ServiceError::NotFound(inner) => Self::NotFound {
                message: inner.to_string(),
            },
            ServiceError::Translatable(inner) => Self::Custom {
                status: inner.status,
                message: inner.message,
                internal: None,
            },
            ServiceError::Pagination(inner) => inner.into(),
            ServiceError::Database(inner) => inner.into(),
        }
    }
}
