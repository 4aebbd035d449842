//! Response cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of a cached dashboard response. Zero disables the cache.
    #[serde(default = "default_dashboard_ttl_secs")]
    pub dashboard_ttl_secs: u64,
}

impl CacheConfig {
    /// Dashboard TTL as a duration.
    #[must_use]
    pub const fn dashboard_ttl(&self) -> Duration {
        Duration::from_secs(self.dashboard_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dashboard_ttl_secs: default_dashboard_ttl_secs(),
        }
    }
}

const fn default_dashboard_ttl_secs() -> u64 {
    60
}
