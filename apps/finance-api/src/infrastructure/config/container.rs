//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::ApplicationError;
use crate::application::ports::{InMemoryActivityTracker, UserGroupPort};
use crate::application::services::CurrencySettings;
use crate::application::use_cases::{
    AccountColumnsUseCase, BudgetDashboardUseCase, DashboardCache, ListAccountsUseCase,
    ManagePreferencesUseCase, UpdateAccountUseCase,
};
use crate::config::Config;
use crate::domain::accounts::AccountRepository;
use crate::domain::budgeting::BudgetRepository;
use crate::domain::currency::CurrencyRepository;
use crate::domain::preferences::PreferenceRepository;
use crate::domain::shared::UserGroupId;
use crate::domain::transactions::TransactionRepository;
use crate::infrastructure::persistence::{
    InMemoryAccountRepository, InMemoryBudgetRepository, InMemoryCurrencyRepository,
    InMemoryPreferenceRepository, InMemoryRepositories, InMemoryTransactionRepository,
    InMemoryUserGroupRepository,
};

/// The set of storage adapters the container wires into use cases.
pub trait Repositories: Send + Sync + 'static {
    /// Budget and limit storage.
    type Budgets: BudgetRepository + 'static;
    /// Transaction journal storage.
    type Transactions: TransactionRepository + 'static;
    /// Currency and exchange-rate storage.
    type Currencies: CurrencyRepository + 'static;
    /// Account storage.
    type Accounts: AccountRepository + 'static;
    /// Preference storage.
    type Preferences: PreferenceRepository + 'static;
    /// User group lookup.
    type UserGroups: UserGroupPort + 'static;

    /// Get the budget repository.
    fn budgets(&self) -> Arc<Self::Budgets>;
    /// Get the transaction repository.
    fn transactions(&self) -> Arc<Self::Transactions>;
    /// Get the currency repository.
    fn currencies(&self) -> Arc<Self::Currencies>;
    /// Get the account repository.
    fn accounts(&self) -> Arc<Self::Accounts>;
    /// Get the preference repository.
    fn preferences(&self) -> Arc<Self::Preferences>;
    /// Get the user group port.
    fn user_groups(&self) -> Arc<Self::UserGroups>;
}

impl Repositories for InMemoryRepositories {
    type Budgets = InMemoryBudgetRepository;
    type Transactions = InMemoryTransactionRepository;
    type Currencies = InMemoryCurrencyRepository;
    type Accounts = InMemoryAccountRepository;
    type Preferences = InMemoryPreferenceRepository;
    type UserGroups = InMemoryUserGroupRepository;

    fn budgets(&self) -> Arc<Self::Budgets> {
        Arc::clone(&self.budgets)
    }

    fn transactions(&self) -> Arc<Self::Transactions> {
        Arc::clone(&self.transactions)
    }

    fn currencies(&self) -> Arc<Self::Currencies> {
        Arc::clone(&self.currencies)
    }

    fn accounts(&self) -> Arc<Self::Accounts> {
        Arc::clone(&self.accounts)
    }

    fn preferences(&self) -> Arc<Self::Preferences> {
        Arc::clone(&self.preferences)
    }

    fn user_groups(&self) -> Arc<Self::UserGroups> {
        Arc::clone(&self.user_groups)
    }
}

/// Dashboard use case wired to the container's repositories.
pub type DashboardUseCaseFor<R> = BudgetDashboardUseCase<
    <R as Repositories>::Budgets,
    <R as Repositories>::Transactions,
    <R as Repositories>::Currencies,
    InMemoryActivityTracker,
>;

/// Accounts listing use case wired to the container's repositories.
pub type ListAccountsUseCaseFor<R> = ListAccountsUseCase<
    <R as Repositories>::Accounts,
    <R as Repositories>::Transactions,
    <R as Repositories>::Currencies,
>;

/// Account edit use case wired to the container's repositories.
pub type UpdateAccountUseCaseFor<R> =
    UpdateAccountUseCase<<R as Repositories>::Accounts, InMemoryActivityTracker>;

/// Column settings use case wired to the container's repositories.
pub type AccountColumnsUseCaseFor<R> =
    AccountColumnsUseCase<<R as Repositories>::Preferences, InMemoryActivityTracker>;

/// Preferences use case wired to the container's repositories.
pub type ManagePreferencesUseCaseFor<R> =
    ManagePreferencesUseCase<<R as Repositories>::Preferences, InMemoryActivityTracker>;

/// Dependency injection container.
///
/// Holds the repositories plus the state shared by every request: the
/// activity token, the dashboard response cache and the currency settings.
pub struct Container<R: Repositories> {
    repositories: R,
    activity: Arc<InMemoryActivityTracker>,
    dashboard_cache: Arc<DashboardCache>,
    currency_settings: CurrencySettings,
    page_size: usize,
    default_user_group: UserGroupId,
}

impl<R: Repositories> Container<R> {
    /// Create a new container from repositories and the loaded config.
    pub fn new(repositories: R, config: &Config) -> Self {
        let app = &config.application;
        let currency_settings = CurrencySettings {
            native_currency_code: app.native_currency.clone(),
            fallback_rates: Arc::new(app.fallback_rates.clone()),
        };
        Self {
            repositories,
            activity: Arc::new(InMemoryActivityTracker::new()),
            dashboard_cache: Arc::new(DashboardCache::new(config.cache.dashboard_ttl())),
            currency_settings,
            page_size: app.page_size,
            default_user_group: UserGroupId::new(app.default_user_group),
        }
    }

    /// Get the repositories.
    pub const fn repositories(&self) -> &R {
        &self.repositories
    }

    /// Get the activity tracker.
    pub fn activity(&self) -> Arc<InMemoryActivityTracker> {
        Arc::clone(&self.activity)
    }

    /// Get the currency settings.
    pub const fn currency_settings(&self) -> &CurrencySettings {
        &self.currency_settings
    }

    /// Group used when a request names none.
    pub const fn default_user_group(&self) -> UserGroupId {
        self.default_user_group
    }

    /// Resolve the user group a request is scoped to.
    ///
    /// Falls back to the configured default group.
    pub async fn resolve_user_group(
        &self,
        requested: Option<UserGroupId>,
    ) -> Result<UserGroupId, ApplicationError> {
        let id = requested.unwrap_or(self.default_user_group);
        match self.repositories.user_groups().find_group(id).await? {
            Some(group) => Ok(group.id),
            None => Err(ApplicationError::UserGroupNotFound(id)),
        }
    }

    /// Create a `BudgetDashboardUseCase`.
    pub fn budget_dashboard_use_case(&self) -> DashboardUseCaseFor<R> {
        BudgetDashboardUseCase::new(
            self.repositories.budgets(),
            self.repositories.transactions(),
            self.repositories.currencies(),
            Arc::clone(&self.activity),
            Arc::clone(&self.dashboard_cache),
            self.currency_settings.clone(),
        )
    }

    /// Create a `ListAccountsUseCase`.
    pub fn list_accounts_use_case(&self) -> ListAccountsUseCaseFor<R> {
        ListAccountsUseCase::new(
            self.repositories.accounts(),
            self.repositories.transactions(),
            self.repositories.currencies(),
            self.currency_settings.clone(),
            self.page_size,
        )
    }

    /// Create an `UpdateAccountUseCase`.
    pub fn update_account_use_case(&self) -> UpdateAccountUseCaseFor<R> {
        UpdateAccountUseCase::new(self.repositories.accounts(), Arc::clone(&self.activity))
    }

    /// Create an `AccountColumnsUseCase`.
    pub fn account_columns_use_case(&self) -> AccountColumnsUseCaseFor<R> {
        AccountColumnsUseCase::new(self.repositories.preferences(), Arc::clone(&self.activity))
    }

    /// Create a `ManagePreferencesUseCase`.
    pub fn manage_preferences_use_case(&self) -> ManagePreferencesUseCaseFor<R> {
        ManagePreferencesUseCase::new(self.repositories.preferences(), Arc::clone(&self.activity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ActivityPort, UserGroup};
    use crate::domain::accounts::AccountTypeFilter;
    use chrono::NaiveDate;

    fn container() -> Container<InMemoryRepositories> {
        let repos = InMemoryRepositories::new();
        repos.user_groups.add(UserGroup {
            id: UserGroupId::new(1),
            title: "Household".to_string(),
        });
        Container::new(repos, &Config::default())
    }

    #[tokio::test]
    async fn resolves_default_group() {
        let container = container();
        assert_eq!(
            container.resolve_user_group(None).await.unwrap(),
            UserGroupId::new(1)
        );
    }

    #[tokio::test]
    async fn unknown_group_is_not_found() {
        let err = container()
            .resolve_user_group(Some(UserGroupId::new(9)))
            .await
            .unwrap_err();
        assert_eq!(err, ApplicationError::UserGroupNotFound(UserGroupId::new(9)));
    }

    #[test]
    fn currency_settings_follow_config() {
        let container = container();
        assert_eq!(container.currency_settings().native_currency_code, "EUR");
        assert_eq!(container.default_user_group(), UserGroupId::new(1));
    }

    #[tokio::test]
    async fn use_cases_share_activity_token() {
        let container = container();
        let before = container.activity().last_activity();

        container
            .account_columns_use_case()
            .put(
                UserGroupId::new(1),
                AccountTypeFilter::Asset,
                &serde_json::json!({ "menu": false }),
            )
            .await
            .unwrap();

        assert_ne!(container.activity().last_activity(), before);
    }

    #[tokio::test]
    async fn dashboard_without_currencies_reports_missing_native() {
        let container = container();
        let range = crate::domain::shared::DateRange::from_dates(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();
        let err = container
            .budget_dashboard_use_case()
            .execute(UserGroupId::new(1), range)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Currency(_)), "{err:?}");
    }
}
