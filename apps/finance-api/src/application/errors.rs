//! Application errors.
//!
//! Wraps the errors of every bounded context a use case touches.

use thiserror::Error;

use super::ports::UserGroupError;
use crate::domain::accounts::AccountError;
use crate::domain::budgeting::BudgetError;
use crate::domain::currency::{CurrencyError, ExchangeRateError};
use crate::domain::preferences::PreferenceError;
use crate::domain::shared::{DomainError, UserGroupId};
use crate::domain::transactions::TransactionError;

/// Error returned by use cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Budget lookup failed.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Transaction lookup failed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Currency lookup failed.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Conversion between currencies failed.
    #[error(transparent)]
    ExchangeRate(#[from] ExchangeRateError),

    /// Account lookup or edit failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Preference lookup or write failed.
    #[error(transparent)]
    Preference(#[from] PreferenceError),

    /// User group lookup failed.
    #[error(transparent)]
    UserGroup(#[from] UserGroupError),

    /// The requested user group does not exist.
    #[error("User group not found: {0}")]
    UserGroupNotFound(UserGroupId),

    /// Invalid input that is not specific to one context.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
