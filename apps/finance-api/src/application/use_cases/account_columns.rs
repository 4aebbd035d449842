//! Account Columns Use Case
//!
//! Reads and writes the per-type column layout of the accounts grid.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::application::dto::AccountColumnsDto;
use crate::application::errors::ApplicationError;
use crate::application::ports::ActivityPort;
use crate::domain::accounts::{
    AccountColumn, AccountError, AccountTypeFilter, ColumnSettings, column_preference_name,
    default_column_preference,
};
use crate::domain::preferences::{Preference, PreferenceRepository};
use crate::domain::shared::UserGroupId;
use crate::observability::record_preference_write;

/// Use case for the accounts grid column settings.
pub struct AccountColumnsUseCase<P, A>
where
    P: PreferenceRepository,
    A: ActivityPort,
{
    preferences: Arc<P>,
    activity: Arc<A>,
}

impl<P, A> AccountColumnsUseCase<P, A>
where
    P: PreferenceRepository,
    A: ActivityPort,
{
    /// Create a new AccountColumnsUseCase.
    pub const fn new(preferences: Arc<P>, activity: Arc<A>) -> Self {
        Self {
            preferences,
            activity,
        }
    }

    /// Current layout of a grid type.
    pub async fn get(
        &self,
        group: UserGroupId,
        filter: AccountTypeFilter,
    ) -> Result<AccountColumnsDto, ApplicationError> {
        let stored = self.stored(group, filter).await?;
        Ok(dto(filter, &stored))
    }

    /// Merge `enabled` flags into the stored layout.
    ///
    /// The body maps column keys to booleans. Columns it leaves out keep
    /// their current setting.
    #[tracing::instrument(skip(self, body), fields(filter = filter.as_str()))]
    pub async fn put(
        &self,
        group: UserGroupId,
        filter: AccountTypeFilter,
        body: &Value,
    ) -> Result<AccountColumnsDto, ApplicationError> {
        let Some(flags) = body.as_object() else {
            return Err(
                AccountError::validation("columns", "expected an object of column flags").into(),
            );
        };

        let mut merged = match self.stored(group, filter).await? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, flag) in flags {
            if AccountColumn::from_key(key).is_none() {
                return Err(AccountError::validation(key, "unknown column").into());
            }
            let Some(enabled) = flag.as_bool() else {
                return Err(AccountError::validation(key, "must be true or false").into());
            };
            merged.insert(key.clone(), Value::Bool(enabled));
        }

        let settings = ColumnSettings::resolve(filter, &Value::Object(merged));
        let preference = Preference::new(
            group,
            &column_preference_name(filter),
            settings.to_preference(),
        )?;
        self.preferences.save(&preference).await?;
        self.activity.touch();
        record_preference_write("columns");
        tracing::info!(preference = %preference.name, "Column settings saved");

        Ok(dto(filter, &preference.data))
    }

    async fn stored(
        &self,
        group: UserGroupId,
        filter: AccountTypeFilter,
    ) -> Result<Value, ApplicationError> {
        Ok(self
            .preferences
            .find(group, &column_preference_name(filter))
            .await?
            .map_or_else(default_column_preference, |p| p.data))
    }
}

fn dto(filter: AccountTypeFilter, stored: &Value) -> AccountColumnsDto {
    AccountColumnsDto {
        grid_type: filter.as_str().to_string(),
        preference: column_preference_name(filter),
        columns: ColumnSettings::resolve(filter, stored),
    }
}
