//! User Group Port (Driven Port)
//!
//! Resolves the user group a request is scoped to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::shared::UserGroupId;

/// A group of users sharing one set of financial records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    /// Group ID.
    pub id: UserGroupId,
    /// Display title.
    pub title: String,
}

/// User group lookup error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserGroupError {
    /// The backing store failed.
    #[error("User group repository failure: {0}")]
    Repository(String),
}

/// Port for looking up user groups.
#[async_trait]
pub trait UserGroupPort: Send + Sync {
    /// Find a user group by ID.
    async fn find_group(&self, id: UserGroupId) -> Result<Option<UserGroup>, UserGroupError>;
}
