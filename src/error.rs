use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::repository::RepositoryError;

/// ErrorDetails
///
/// The JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ErrorDetails {
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    /// Per-field constraint messages, only present for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, Vec<String>>>,
}

/// AppError
///
/// Every failure a request can end in. Services return it, handlers pass it through untouched,
/// and `IntoResponse` turns it into a status code plus `ErrorDetails`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{resource} not found with {field} : '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// A domain rule rejected the request (e.g. a comment addressed through the wrong post).
    #[error("{message}")]
    BlogApi { status: StatusCode, message: String },

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Full authentication is required to access this resource")]
    Unauthorized,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Access denied")]
    Forbidden,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: &'static str, field: &'static str, value: impl ToString) -> Self {
        AppError::NotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BlogApi {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BlogApi { status, .. } => *status,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Repository(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> ErrorDetails {
        let status = self.status();
        let message = match self {
            // Store failures are logged, never echoed to the client.
            AppError::Repository(_) => "An unexpected database error occurred".to_string(),
            other => other.to_string(),
        };
        let field_errors = match self {
            AppError::Validation(errors) => Some(field_messages(errors)),
            _ => None,
        };

        ErrorDetails {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            field_errors,
        }
    }
}

fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", e.code))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        (status, Json(self.details())).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    #[test]
    fn not_found_message_names_resource_field_and_value() {
        let err = AppError::not_found("Post", "id", 42);
        assert_eq!(err.to_string(), "Post not found with id : '42'");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_are_listed_per_field() {
        let errors = Probe { name: "ab".into() }.validate().unwrap_err();
        let details = AppError::from(errors).details();

        assert_eq!(details.status, 400);
        let fields = details.field_errors.expect("field errors present");
        assert_eq!(fields["name"], vec!["too short".to_string()]);
    }

    #[test]
    fn repository_errors_hide_the_cause() {
        let err = AppError::Repository(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        let details = err.details();
        assert_eq!(details.status, 500);
        assert!(!details.message.contains("pool"));
    }
}
