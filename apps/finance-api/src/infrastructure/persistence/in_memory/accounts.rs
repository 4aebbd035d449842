//! In-memory account repository.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::accounts::{Account, AccountError, AccountRepository, AccountTypeFilter};
use crate::domain::shared::{AccountId, UserGroupId};

/// In-memory implementation of `AccountRepository`.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an account.
    pub fn add(&self, account: Account) {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        accounts.insert(account.id, account);
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no accounts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn list(
        &self,
        group: UserGroupId,
        filter: AccountTypeFilter,
    ) -> Result<Vec<Account>, AccountError> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(accounts
            .values()
            .filter(|a| a.user_group_id == group && filter.matches(a.account_type))
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        group: UserGroupId,
        id: AccountId,
    ) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(accounts
            .get(&id)
            .filter(|a| a.user_group_id == group)
            .cloned())
    }

    async fn save(&self, account: &Account) -> Result<(), AccountError> {
        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        let clash = accounts.values().any(|other| {
            other.id != account.id
                && other.user_group_id == account.user_group_id
                && other.account_type == account.account_type
                && other.name == account.name
        });
        if clash {
            return Err(AccountError::NameTaken {
                name: account.name.clone(),
                account_type: account.account_type,
            });
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }
}
