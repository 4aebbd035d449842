//! Logging configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Observability section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservabilityConfig {
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Terse single-line text.
    Compact,
    /// Multi-line human-readable text.
    Pretty,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Compact => "compact",
            Self::Pretty => "pretty",
        })
    }
}

/// Level filter and output format of the log subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `finance_api=debug,tower=warn`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Log span close events with their timings.
    #[serde(default = "default_include_spans")]
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            include_spans: default_include_spans(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_include_spans() -> bool {
    true
}
