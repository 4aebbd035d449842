//! Application Use Cases
//!
//! Each use case wires repositories and services together for one API
//! operation.

mod account_columns;
mod budget_dashboard;
mod list_accounts;
mod manage_preferences;
mod update_account;

#[cfg(test)]
pub(crate) mod test_support;

pub use account_columns::AccountColumnsUseCase;
pub use budget_dashboard::{BudgetDashboardUseCase, DashboardCache};
pub use list_accounts::{AccountListQuery, ListAccountsUseCase};
pub use manage_preferences::ManagePreferencesUseCase;
pub use update_account::UpdateAccountUseCase;
