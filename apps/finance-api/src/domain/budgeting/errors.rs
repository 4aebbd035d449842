//! Budgeting errors.

use thiserror::Error;

use crate::domain::shared::{BudgetId, BudgetLimitId};

/// Errors that can occur while reading budgets and their limits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Budget does not exist in the requested user group.
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// A stored limit is inconsistent.
    #[error("Budget limit {limit_id} is invalid: {message}")]
    InvalidLimit {
        /// Offending limit.
        limit_id: BudgetLimitId,
        /// What is wrong with it.
        message: String,
    },

    /// The backing store failed.
    #[error("Budget repository failure: {0}")]
    Repository(String),
}
