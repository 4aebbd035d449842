//! Translation table configuration.

use serde::{Deserialize, Serialize};

/// Localization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizationConfig {
    /// Directory holding one sub-directory of YAML tables per locale.
    #[serde(default = "default_lang_path")]
    pub lang_path: String,
    /// Locale used when a request names none.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Locale missing keys are looked up in.
    #[serde(default = "default_locale")]
    pub fallback_locale: String,
    /// Locales served.
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            lang_path: default_lang_path(),
            default_locale: default_locale(),
            fallback_locale: default_locale(),
            locales: default_locales(),
        }
    }
}

fn default_lang_path() -> String {
    "resources/lang".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_locales() -> Vec<String> {
    vec![default_locale()]
}
