//! Preferences Bounded Context
//!
//! Named JSON settings such as the accounts grid column layout.

pub mod errors;
pub mod preference;
pub mod repository;

pub use errors::PreferenceError;
pub use preference::{MAX_PREFERENCE_NAME_LENGTH, Preference};
pub use repository::PreferenceRepository;
