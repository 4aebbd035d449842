//! Budget entity.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{BudgetId, UserGroupId};

/// A named spending envelope owned by a user group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning user group.
    pub user_group_id: UserGroupId,
    /// Display name, used as the chart label.
    pub name: String,
    /// Inactive budgets are left out of the dashboard.
    pub active: bool,
    /// Position in user-defined ordering.
    pub order: u32,
}
