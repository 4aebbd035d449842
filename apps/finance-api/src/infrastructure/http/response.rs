//! HTTP response DTOs and the error-to-status mapping.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::application::ports::UserGroupError;
use crate::domain::accounts::AccountError;
use crate::domain::budgeting::BudgetError;
use crate::domain::preferences::PreferenceError;
use crate::domain::shared::DomainError;
use crate::infrastructure::i18n::TranslationError;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Body of a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    /// Summary of the first failure.
    pub message: String,
    /// Messages per offending field.
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Body of a 404 or 500 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong.
    pub message: String,
    /// Kind of failure.
    pub exception: String,
}

/// Validation messages collected per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Record a message for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }

    /// First message, with a count of the rest.
    fn summary(&self) -> String {
        let mut messages = self.0.values().flatten();
        let Some(first) = messages.next() else {
            return "The given data was invalid.".to_string();
        };
        match messages.count() {
            0 => first.clone(),
            1 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {n} more errors)"),
        }
    }
}

/// Error returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Input failed validation (422).
    Validation(ValidationErrors),
    /// The addressed record does not exist (404).
    NotFound(String),
    /// Anything the client cannot fix (500).
    Internal {
        /// What went wrong.
        message: String,
        /// Kind of failure.
        exception: &'static str,
    },
}

impl ApiError {
    /// A single-field validation error.
    #[must_use]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::default();
        errors.add(field, message);
        Self::Validation(errors)
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn internal(exception: &'static str, error: &impl ToString) -> Self {
        Self::Internal {
            message: error.to_string(),
            exception,
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Account(AccountError::Validation { field, message }) => {
                Self::validation(&field, message)
            }
            ApplicationError::Account(e @ AccountError::NameTaken { .. }) => {
                Self::validation("name", e.to_string())
            }
            ApplicationError::Account(e @ AccountError::NotFound(_)) => {
                Self::NotFound(e.to_string())
            }
            ApplicationError::Budget(e @ BudgetError::NotFound(_)) => Self::NotFound(e.to_string()),
            ApplicationError::Preference(e @ PreferenceError::NotFound(_)) => {
                Self::NotFound(e.to_string())
            }
            ApplicationError::UserGroupNotFound(id) => {
                Self::NotFound(format!("User group not found: {id}"))
            }
            ApplicationError::Preference(
                e @ (PreferenceError::AlreadyExists(_) | PreferenceError::InvalidName(_)),
            ) => Self::validation("name", e.to_string()),
            ApplicationError::Domain(DomainError::InvalidValue { field, message }) => {
                Self::validation(&field, message)
            }
            ApplicationError::ExchangeRate(e) => Self::internal("ExchangeRateError", &e),
            ApplicationError::Currency(e) => Self::internal("CurrencyError", &e),
            ApplicationError::Budget(e) => Self::internal("BudgetError", &e),
            ApplicationError::Transaction(e) => Self::internal("TransactionError", &e),
            ApplicationError::Account(e) => Self::internal("AccountError", &e),
            ApplicationError::Preference(e) => Self::internal("PreferenceError", &e),
            ApplicationError::UserGroup(e @ UserGroupError::Repository(_)) => {
                Self::internal("UserGroupError", &e)
            }
        }
    }
}

impl From<TranslationError> for ApiError {
    fn from(error: TranslationError) -> Self {
        match error {
            TranslationError::UnknownLocale(_) => Self::NotFound(error.to_string()),
            TranslationError::Io { .. } | TranslationError::Parse { .. } => {
                Self::internal("TranslationError", &error)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(errors) => {
                tracing::debug!(fields = errors.0.len(), "Request failed validation");
                let body = ValidationErrorResponse {
                    message: errors.summary(),
                    errors: errors.0,
                };
                (status, Json(body)).into_response()
            }
            Self::NotFound(message) => (
                status,
                Json(ErrorResponse {
                    message,
                    exception: "NotFound".to_string(),
                }),
            )
                .into_response(),
            Self::Internal { message, exception } => {
                tracing::error!(exception, error = %message, "Request failed");
                (
                    status,
                    Json(ErrorResponse {
                        message,
                        exception: exception.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
