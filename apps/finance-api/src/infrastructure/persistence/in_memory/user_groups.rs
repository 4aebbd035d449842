//! In-memory user group lookup.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{UserGroup, UserGroupError, UserGroupPort};
use crate::domain::shared::UserGroupId;

/// In-memory implementation of `UserGroupPort`.
#[derive(Debug, Default)]
pub struct InMemoryUserGroupRepository {
    groups: RwLock<HashMap<UserGroupId, UserGroup>>,
}

impl InMemoryUserGroupRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a group.
    pub fn add(&self, group: UserGroup) {
        let mut groups = self.groups.write().unwrap_or_else(PoisonError::into_inner);
        groups.insert(group.id, group);
    }
}

#[async_trait]
impl UserGroupPort for InMemoryUserGroupRepository {
    async fn find_group(&self, id: UserGroupId) -> Result<Option<UserGroup>, UserGroupError> {
        let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
        Ok(groups.get(&id).cloned())
    }
}
