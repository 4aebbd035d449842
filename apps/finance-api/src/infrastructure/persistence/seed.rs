//! Seed data loading.
//!
//! The in-memory store is filled from a YAML document at startup. References
//! between records are checked before anything is stored.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::in_memory::{
    InMemoryAccountRepository, InMemoryBudgetRepository, InMemoryCurrencyRepository,
    InMemoryPreferenceRepository, InMemoryTransactionRepository, InMemoryUserGroupRepository,
};
use crate::application::ports::UserGroup;
use crate::domain::accounts::{Account, AccountType, is_valid_iban};
use crate::domain::budgeting::{Budget, BudgetLimit};
use crate::domain::currency::{ExchangeRate, TransactionCurrency, normalize_code};
use crate::domain::preferences::Preference;
use crate::domain::transactions::TransactionJournal;

/// Errors raised while loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("Failed to read seed file '{path}': {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The seed file is not valid YAML for the seed schema.
    #[error("Failed to parse seed data: {0}")]
    Parse(#[from] serde_yaml_bw::Error),

    /// A record is inconsistent or references a missing record.
    #[error("Invalid seed data: {0}")]
    Invalid(String),
}

/// Every record the store starts with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    /// User groups.
    pub user_groups: Vec<UserGroup>,
    /// Currencies.
    pub currencies: Vec<TransactionCurrency>,
    /// Stored exchange rates.
    pub exchange_rates: Vec<ExchangeRate>,
    /// Budgets.
    pub budgets: Vec<Budget>,
    /// Budget limits.
    pub budget_limits: Vec<BudgetLimit>,
    /// Accounts.
    pub accounts: Vec<Account>,
    /// Transaction journals.
    pub transactions: Vec<TransactionJournal>,
    /// Preferences.
    pub preferences: Vec<Preference>,
}

impl SeedData {
    /// Read and validate a seed file.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate seed data from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, SeedError> {
        let seed: Self = serde_yaml_bw::from_str(content)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Check field rules and references between records.
    pub fn validate(&self) -> Result<(), SeedError> {
        let groups: HashSet<_> = self.user_groups.iter().map(|g| g.id).collect();
        let currencies: HashSet<_> = self.currencies.iter().map(|c| c.id).collect();
        let budgets: HashSet<_> = self.budgets.iter().map(|b| b.id).collect();
        let accounts: HashSet<_> = self.accounts.iter().map(|a| a.id).collect();

        let group_ids = self
            .budgets
            .iter()
            .map(|b| (b.user_group_id, format!("budget {}", b.id)))
            .chain(
                self.accounts
                    .iter()
                    .map(|a| (a.user_group_id, format!("account {}", a.id))),
            )
            .chain(
                self.transactions
                    .iter()
                    .map(|j| (j.user_group_id, format!("journal {}", j.id))),
            )
            .chain(
                self.preferences
                    .iter()
                    .map(|p| (p.user_group_id, format!("preference '{}'", p.name))),
            );
        for (group, owner) in group_ids {
            require(groups.contains(&group), || {
                format!("{owner} belongs to unknown user group {group}")
            })?;
        }

        for currency in &self.currencies {
            normalize_code(&currency.code).map_err(|e| SeedError::Invalid(e.to_string()))?;
        }
        for rate in &self.exchange_rates {
            require(
                currencies.contains(&rate.from) && currencies.contains(&rate.to),
                || format!("exchange rate on {} uses an unknown currency", rate.date),
            )?;
        }

        for limit in &self.budget_limits {
            BudgetLimit::new(
                limit.id,
                limit.budget_id,
                limit.currency_id,
                limit.amount,
                limit.start_date,
                limit.end_date,
            )
            .map_err(|e| SeedError::Invalid(e.to_string()))?;
            require(budgets.contains(&limit.budget_id), || {
                format!("limit {} references unknown budget {}", limit.id, limit.budget_id)
            })?;
            require(currencies.contains(&limit.currency_id), || {
                format!("limit {} uses unknown currency {}", limit.id, limit.currency_id)
            })?;
        }

        for account in &self.accounts {
            require(currencies.contains(&account.currency_id), || {
                format!("account {} uses unknown currency {}", account.id, account.currency_id)
            })?;
            require(
                account.account_role.is_none() || account.account_type == AccountType::Asset,
                || format!("account {} has a role but is not an asset account", account.id),
            )?;
            require(
                account.iban.as_deref().is_none_or(is_valid_iban),
                || format!("account {} has an invalid IBAN", account.id),
            )?;
        }

        for journal in &self.transactions {
            require(!journal.amount.is_negative(), || {
                format!("journal {} has a negative amount", journal.id)
            })?;
            require(currencies.contains(&journal.currency_id), || {
                format!("journal {} uses unknown currency {}", journal.id, journal.currency_id)
            })?;
            require(
                journal.foreign_currency_id.is_none_or(|id| currencies.contains(&id)),
                || format!("journal {} uses an unknown foreign currency", journal.id),
            )?;
            require(
                accounts.contains(&journal.source_id) && accounts.contains(&journal.destination_id),
                || format!("journal {} references an unknown account", journal.id),
            )?;
            require(
                journal.budget_id.is_none_or(|id| budgets.contains(&id)),
                || format!("journal {} references an unknown budget", journal.id),
            )?;
        }
        Ok(())
    }
}

fn require(condition: bool, message: impl FnOnce() -> String) -> Result<(), SeedError> {
    if condition {
        Ok(())
    } else {
        Err(SeedError::Invalid(message()))
    }
}

/// The full set of in-memory repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepositories {
    /// Budgets and limits.
    pub budgets: Arc<InMemoryBudgetRepository>,
    /// Transaction journals.
    pub transactions: Arc<InMemoryTransactionRepository>,
    /// Currencies and exchange rates.
    pub currencies: Arc<InMemoryCurrencyRepository>,
    /// Accounts.
    pub accounts: Arc<InMemoryAccountRepository>,
    /// Preferences.
    pub preferences: Arc<InMemoryPreferenceRepository>,
    /// User groups.
    pub user_groups: Arc<InMemoryUserGroupRepository>,
}

impl InMemoryRepositories {
    /// Create empty repositories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create repositories holding the given seed data.
    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        let repos = Self::new();
        for group in seed.user_groups {
            repos.user_groups.add(group);
        }
        for currency in seed.currencies {
            repos.currencies.add_currency(currency);
        }
        for rate in seed.exchange_rates {
            repos.currencies.add_rate(rate);
        }
        for budget in seed.budgets {
            repos.budgets.add_budget(budget);
        }
        for limit in seed.budget_limits {
            repos.budgets.add_limit(limit);
        }
        for account in seed.accounts {
            repos.accounts.add(account);
        }
        for journal in seed.transactions {
            repos.transactions.add(journal);
        }
        for preference in seed.preferences {
            repos.preferences.add(preference);
        }
        tracing::info!(
            budgets = repos.budgets.len(),
            accounts = repos.accounts.len(),
            journals = repos.transactions.len(),
            "Seed data loaded"
        );
        repos
    }
}
