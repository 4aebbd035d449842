//! Preference DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::preferences::Preference;

/// Attributes of a preference resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceAttributesDto {
    /// Preference name.
    pub name: String,
    /// Stored value.
    pub data: Value,
}

/// A preference resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceDto {
    /// Always `preferences`.
    #[serde(rename = "type")]
    pub resource_type: &'static str,
    /// The name doubles as the ID.
    pub id: String,
    /// Attributes.
    pub attributes: PreferenceAttributesDto,
}

impl From<Preference> for PreferenceDto {
    fn from(preference: Preference) -> Self {
        Self {
            resource_type: "preferences",
            id: preference.name.clone(),
            attributes: PreferenceAttributesDto {
                name: preference.name,
                data: preference.data,
            },
        }
    }
}

/// A single preference document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceSingleDto {
    /// The preference.
    pub data: PreferenceDto,
}

/// Body of a preference create request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePreferenceDto {
    /// Name of the new preference.
    pub name: String,
    /// Value to store.
    pub data: Value,
}

/// Body of a preference update request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePreferenceDto {
    /// Value to store.
    pub data: Value,
}
