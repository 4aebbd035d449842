//! Update Account Use Case

use std::sync::Arc;

use chrono::Utc;

use crate::application::errors::ApplicationError;
use crate::application::ports::ActivityPort;
use crate::domain::accounts::{Account, AccountError, AccountRepository, AccountUpdate};
use crate::domain::shared::{AccountId, UserGroupId};
use crate::observability::record_account_update;

/// Use case for inline edits from the accounts grid.
pub struct UpdateAccountUseCase<A, P>
where
    A: AccountRepository,
    P: ActivityPort,
{
    accounts: Arc<A>,
    activity: Arc<P>,
}

impl<A, P> UpdateAccountUseCase<A, P>
where
    A: AccountRepository,
    P: ActivityPort,
{
    /// Create a new UpdateAccountUseCase.
    pub const fn new(accounts: Arc<A>, activity: Arc<P>) -> Self {
        Self { accounts, activity }
    }

    /// Apply a partial update and return the stored account.
    ///
    /// An update without fields leaves the account and the activity token
    /// untouched.
    #[tracing::instrument(skip(self, update))]
    pub async fn execute(
        &self,
        group: UserGroupId,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<Account, ApplicationError> {
        // 1. Load the account
        let mut account = self
            .accounts
            .find_by_id(group, id)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        // 2. Validate the submitted fields
        let changes = match update.validate(&account) {
            Ok(changes) => changes,
            Err(e) => {
                record_account_update("invalid");
                return Err(e.into());
            }
        };
        if changes.is_empty() {
            record_account_update("noop");
            return Ok(account);
        }

        // 3. Persist (names are unique per account type) and invalidate
        //    cached responses
        account.apply(changes, Utc::now());
        if let Err(e) = self.accounts.save(&account).await {
            if matches!(e, AccountError::NameTaken { .. }) {
                record_account_update("invalid");
            }
            return Err(e.into());
        }
        self.activity.touch();

        tracing::info!(account_id = %account.id, "Account updated");
        record_account_update("updated");
        Ok(account)
    }
}
