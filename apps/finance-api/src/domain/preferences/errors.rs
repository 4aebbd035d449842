//! Preference errors.

use thiserror::Error;

/// Errors that can occur while reading or writing preferences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// No preference with that name.
    #[error("Preference not found: {0}")]
    NotFound(String),

    /// A preference with that name already exists.
    #[error("Preference '{0}' already exists")]
    AlreadyExists(String),

    /// The name is blank or too long.
    #[error("Invalid preference name: {0}")]
    InvalidName(String),

    /// The backing store failed.
    #[error("Preference repository failure: {0}")]
    Repository(String),
}
