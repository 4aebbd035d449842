//! Account Repository Trait

use async_trait::async_trait;

use super::account::Account;
use super::account_type::AccountTypeFilter;
use super::errors::AccountError;
use crate::domain::shared::{AccountId, UserGroupId};

/// Repository trait for accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Accounts of a group passing the type filter, in no particular order.
    async fn list(
        &self,
        group: UserGroupId,
        filter: AccountTypeFilter,
    ) -> Result<Vec<Account>, AccountError>;

    /// Find an account by ID within a group.
    async fn find_by_id(
        &self,
        group: UserGroupId,
        id: AccountId,
    ) -> Result<Option<Account>, AccountError>;

    /// Store an account, replacing the existing one with the same ID.
    ///
    /// Names are unique per account type within a group: when another
    /// account already carries the name, nothing is stored and
    /// [`AccountError::NameTaken`] is returned. The check and the write are
    /// one atomic step.
    async fn save(&self, account: &Account) -> Result<(), AccountError>;
}
