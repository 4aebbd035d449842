//! In-memory budget repository.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::budgeting::{Budget, BudgetError, BudgetLimit, BudgetRepository};
use crate::domain::shared::{BudgetId, BudgetLimitId, DateRange, UserGroupId};

/// In-memory implementation of `BudgetRepository`.
#[derive(Debug, Default)]
pub struct InMemoryBudgetRepository {
    budgets: RwLock<HashMap<BudgetId, Budget>>,
    limits: RwLock<HashMap<BudgetLimitId, BudgetLimit>>,
}

impl InMemoryBudgetRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a budget.
    pub fn add_budget(&self, budget: Budget) {
        let mut budgets = self.budgets.write().unwrap_or_else(PoisonError::into_inner);
        budgets.insert(budget.id, budget);
    }

    /// Add or replace a budget limit.
    pub fn add_limit(&self, limit: BudgetLimit) {
        let mut limits = self.limits.write().unwrap_or_else(PoisonError::into_inner);
        limits.insert(limit.id, limit);
    }

    /// Number of stored budgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.budgets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no budgets are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BudgetRepository for InMemoryBudgetRepository {
    async fn active_budgets(&self, group: UserGroupId) -> Result<Vec<Budget>, BudgetError> {
        let budgets = self.budgets.read().unwrap_or_else(PoisonError::into_inner);
        let mut active: Vec<Budget> = budgets
            .values()
            .filter(|b| b.user_group_id == group && b.active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        Ok(active)
    }

    async fn limits_in_range(
        &self,
        budget: BudgetId,
        range: &DateRange,
    ) -> Result<Vec<BudgetLimit>, BudgetError> {
        let limits = self.limits.read().unwrap_or_else(PoisonError::into_inner);
        let mut matching: Vec<BudgetLimit> = limits
            .values()
            .filter(|l| l.budget_id == budget && l.overlaps(range))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::{Amount, CurrencyId};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn budget(id: u64, name: &str, order: u32, active: bool) -> Budget {
        Budget {
            id: BudgetId::new(id),
            user_group_id: UserGroupId::new(1),
            name: name.to_string(),
            active,
            order,
        }
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn limit(id: u64, start: NaiveDate, end: NaiveDate) -> BudgetLimit {
        BudgetLimit::new(
            BudgetLimitId::new(id),
            BudgetId::new(1),
            CurrencyId::new(1),
            Amount::new(dec!(100)),
            start,
            end,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn active_budgets_sorted_by_order_then_name() {
        let repo = InMemoryBudgetRepository::new();
        repo.add_budget(budget(1, "Groceries", 2, true));
        repo.add_budget(budget(2, "Bills", 1, true));
        repo.add_budget(budget(3, "Fun", 1, true));
        repo.add_budget(budget(4, "Old", 0, false));

        let names: Vec<String> = repo
            .active_budgets(UserGroupId::new(1))
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["Bills", "Fun", "Groceries"]);
        assert!(repo.active_budgets(UserGroupId::new(2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn limits_overlapping_range_in_start_order() {
        let repo = InMemoryBudgetRepository::new();
        repo.add_limit(limit(1, date(2, 1), date(2, 29)));
        repo.add_limit(limit(2, date(1, 1), date(1, 31)));
        repo.add_limit(limit(3, date(3, 1), date(3, 31)));

        let range = DateRange::from_dates(date(1, 15), date(2, 10)).unwrap();
        let ids: Vec<BudgetLimitId> = repo
            .limits_in_range(BudgetId::new(1), &range)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, [BudgetLimitId::new(2), BudgetLimitId::new(1)]);
    }
}
