//! Preference Repository Trait

use async_trait::async_trait;

use super::errors::PreferenceError;
use super::preference::Preference;
use crate::domain::shared::UserGroupId;

/// Repository trait for user preferences.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Find a preference by name.
    async fn find(
        &self,
        group: UserGroupId,
        name: &str,
    ) -> Result<Option<Preference>, PreferenceError>;

    /// Insert or replace a preference.
    async fn save(&self, preference: &Preference) -> Result<(), PreferenceError>;
}
