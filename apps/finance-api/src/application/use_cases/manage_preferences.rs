//! Manage Preferences Use Case

use std::sync::Arc;

use serde_json::Value;

use crate::application::dto::{CreatePreferenceDto, PreferenceSingleDto};
use crate::application::errors::ApplicationError;
use crate::application::ports::ActivityPort;
use crate::domain::preferences::{Preference, PreferenceError, PreferenceRepository};
use crate::domain::shared::UserGroupId;
use crate::observability::record_preference_write;

/// Use case for reading and writing named preferences.
pub struct ManagePreferencesUseCase<P, A>
where
    P: PreferenceRepository,
    A: ActivityPort,
{
    preferences: Arc<P>,
    activity: Arc<A>,
}

impl<P, A> ManagePreferencesUseCase<P, A>
where
    P: PreferenceRepository,
    A: ActivityPort,
{
    /// Create a new ManagePreferencesUseCase.
    pub const fn new(preferences: Arc<P>, activity: Arc<A>) -> Self {
        Self {
            preferences,
            activity,
        }
    }

    /// A stored preference.
    pub async fn get(
        &self,
        group: UserGroupId,
        name: &str,
    ) -> Result<PreferenceSingleDto, ApplicationError> {
        let preference = self
            .preferences
            .find(group, name)
            .await?
            .ok_or_else(|| PreferenceError::NotFound(name.to_string()))?;
        Ok(PreferenceSingleDto {
            data: preference.into(),
        })
    }

    /// Store a new preference. Fails if the name is taken.
    #[tracing::instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        group: UserGroupId,
        request: CreatePreferenceDto,
    ) -> Result<PreferenceSingleDto, ApplicationError> {
        let preference = Preference::new(group, &request.name, request.data)?;
        if self.preferences.find(group, &preference.name).await?.is_some() {
            return Err(PreferenceError::AlreadyExists(preference.name).into());
        }
        self.store(preference, "create").await
    }

    /// Create or replace a preference.
    #[tracing::instrument(skip(self, data))]
    pub async fn put(
        &self,
        group: UserGroupId,
        name: &str,
        data: Value,
    ) -> Result<PreferenceSingleDto, ApplicationError> {
        let preference = Preference::new(group, name, data)?;
        self.store(preference, "update").await
    }

    async fn store(
        &self,
        preference: Preference,
        operation: &'static str,
    ) -> Result<PreferenceSingleDto, ApplicationError> {
        self.preferences.save(&preference).await?;
        self.activity.touch();
        record_preference_write(operation);
        tracing::info!(name = %preference.name, operation, "Preference stored");
        Ok(PreferenceSingleDto {
            data: preference.into(),
        })
    }
}
