//! Activity Port (Driven Port)
//!
//! Tracks an opaque token that changes on every write, so anything keyed on
//! it goes stale as soon as data changes.

use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

/// Port for reading and bumping the last-activity token.
pub trait ActivityPort: Send + Sync {
    /// Current token.
    fn last_activity(&self) -> String;

    /// Replace the token after a write and return the new one.
    fn touch(&self) -> String;
}

/// Activity tracker holding the token in memory.
#[derive(Debug)]
pub struct InMemoryActivityTracker {
    token: RwLock<String>,
}

impl InMemoryActivityTracker {
    /// Create a tracker with a fresh token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: RwLock::new(Uuid::new_v4().simple().to_string()),
        }
    }
}

impl Default for InMemoryActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityPort for InMemoryActivityTracker {
    fn last_activity(&self) -> String {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn touch(&self) -> String {
        let next = Uuid::new_v4().simple().to_string();
        let mut token = self.token.write().unwrap_or_else(PoisonError::into_inner);
        token.clone_from(&next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_changes_token() {
        let tracker = InMemoryActivityTracker::new();
        let before = tracker.last_activity();
        let after = tracker.touch();
        assert_ne!(before, after);
        assert_eq!(tracker.last_activity(), after);
        assert_eq!(after.len(), 32);
    }
}
