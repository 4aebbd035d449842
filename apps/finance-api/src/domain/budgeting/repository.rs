//! Budget Repository Trait
//!
//! Defines the persistence abstraction for budgets and budget limits.

use async_trait::async_trait;

use super::budget::Budget;
use super::budget_limit::BudgetLimit;
use super::errors::BudgetError;
use crate::domain::shared::{BudgetId, DateRange, UserGroupId};

/// Repository trait for budgets and their limits.
#[async_trait]
pub trait BudgetRepository: Send + Sync {
    /// Active budgets of a user group, ordered by `order` then name.
    async fn active_budgets(&self, group: UserGroupId) -> Result<Vec<Budget>, BudgetError>;

    /// Limits of a budget overlapping the given window, ordered by start date.
    async fn limits_in_range(
        &self,
        budget: BudgetId,
        range: &DateRange,
    ) -> Result<Vec<BudgetLimit>, BudgetError>;
}
