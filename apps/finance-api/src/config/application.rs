//! Application settings: native currency, default user group, paging and
//! seed data.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// ISO code of the currency figures are normalized to.
    #[serde(default = "default_native_currency")]
    pub native_currency: String,
    /// User group used when a request names none.
    #[serde(default = "default_user_group")]
    pub default_user_group: u64,
    /// Default page size of list endpoints.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// YAML file the in-memory store is seeded from. Empty starts empty.
    #[serde(default = "default_seed_path")]
    pub seed_path: String,
    /// Rates to EUR by currency code, used when no stored rate exists.
    #[serde(default)]
    pub fallback_rates: HashMap<String, Decimal>,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            native_currency: default_native_currency(),
            default_user_group: default_user_group(),
            page_size: default_page_size(),
            seed_path: default_seed_path(),
            fallback_rates: HashMap::new(),
        }
    }
}

fn default_native_currency() -> String {
    "EUR".to_string()
}

const fn default_user_group() -> u64 {
    1
}

const fn default_page_size() -> usize {
    50
}

fn default_seed_path() -> String {
    "data/seed.yaml".to_string()
}
