//! User preference entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::PreferenceError;
use crate::domain::shared::UserGroupId;

/// Longest accepted preference name.
pub const MAX_PREFERENCE_NAME_LENGTH: usize = 255;

/// A named blob of JSON settings owned by a user group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Owning user group.
    pub user_group_id: UserGroupId,
    /// Unique name within the group.
    pub name: String,
    /// Arbitrary JSON value.
    pub data: Value,
}

impl Preference {
    /// Create a preference with a validated name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or too long.
    pub fn new(
        user_group_id: UserGroupId,
        name: &str,
        data: Value,
    ) -> Result<Self, PreferenceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PreferenceError::InvalidName(
                "the name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_PREFERENCE_NAME_LENGTH {
            return Err(PreferenceError::InvalidName(format!(
                "the name may not be longer than {MAX_PREFERENCE_NAME_LENGTH} characters"
            )));
        }
        Ok(Self {
            user_group_id,
            name: name.to_string(),
            data,
        })
    }
}
