//! In-memory preference repository.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::preferences::{Preference, PreferenceError, PreferenceRepository};
use crate::domain::shared::UserGroupId;

/// In-memory implementation of `PreferenceRepository`.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceRepository {
    preferences: RwLock<HashMap<(UserGroupId, String), Preference>>,
}

impl InMemoryPreferenceRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a preference.
    pub fn add(&self, preference: Preference) {
        let mut preferences = self
            .preferences
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        preferences.insert((preference.user_group_id, preference.name.clone()), preference);
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferenceRepository {
    async fn find(
        &self,
        group: UserGroupId,
        name: &str,
    ) -> Result<Option<Preference>, PreferenceError> {
        let preferences = self
            .preferences
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(preferences.get(&(group, name.to_string())).cloned())
    }

    async fn save(&self, preference: &Preference) -> Result<(), PreferenceError> {
        self.add(preference.clone());
        Ok(())
    }
}
