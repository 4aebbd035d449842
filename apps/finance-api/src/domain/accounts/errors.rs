//! Account errors.

use thiserror::Error;

use super::account_type::AccountType;
use crate::domain::shared::AccountId;

/// Errors that can occur while reading or editing accounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// No such account in the user group.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// A submitted field failed validation.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// Offending field.
        field: String,
        /// Human-readable reason.
        message: String,
    },

    /// Another account of the same type already has the name.
    #[error("a {account_type} account named '{name}' already exists")]
    NameTaken {
        /// The clashing name.
        name: String,
        /// Type shared by both accounts.
        account_type: AccountType,
    },

    /// The backing store failed.
    #[error("Account repository failure: {0}")]
    Repository(String),
}

impl AccountError {
    /// Shorthand for [`AccountError::Validation`].
    #[must_use]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Field a validation error refers to.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::NameTaken { .. } => Some("name"),
            Self::NotFound(_) | Self::Repository(_) => None,
        }
    }
}
