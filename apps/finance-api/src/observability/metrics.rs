//! Prometheus metrics for the finance API.
//!
//! # Metrics
//!
//! - `finance_dashboard_builds_total` / `finance_dashboard_build_seconds`
//! - `finance_dashboard_rows`
//! - `finance_rate_lookups_total` by source (`cache`, `stored`, `bridge`, `missing`)
//! - `finance_account_updates_total` by outcome
//! - `finance_preference_writes_total` by operation
//! - `finance_translation_misses_total` by locale
//! - `finance_http_requests_total` / `finance_http_request_seconds`

use std::sync::OnceLock;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Latency buckets from 1ms to 5s.
const LATENCY_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics recorder.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

/// Install the Prometheus recorder, once per process.
///
/// Later calls return the handle of the first installation.
///
/// # Errors
///
/// Returns an error if the recorder cannot be built or another global
/// recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, MetricsError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new()
        .set_buckets(LATENCY_BUCKETS)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

fn register_metrics() {
    describe_counter!(
        "finance_dashboard_builds_total",
        "Budget dashboard requests by cache outcome"
    );
    describe_histogram!(
        "finance_dashboard_build_seconds",
        "Time to compute or fetch the budget dashboard"
    );
    describe_histogram!("finance_dashboard_rows", "Rows in a budget dashboard response");
    describe_counter!(
        "finance_rate_lookups_total",
        "Exchange rate lookups by the source that answered them"
    );
    describe_counter!(
        "finance_account_updates_total",
        "Account edits by outcome"
    );
    describe_counter!(
        "finance_preference_writes_total",
        "Preference writes by operation"
    );
    describe_counter!(
        "finance_translation_misses_total",
        "Translation keys missing from both the locale and the fallback"
    );
    describe_counter!("finance_http_requests_total", "HTTP requests by route and status");
    describe_histogram!("finance_http_request_seconds", "HTTP request latency");
}

// ============================================================================
// Budget Dashboard Metrics
// ============================================================================

/// Record a dashboard request.
///
/// # Arguments
///
/// * `cache` - `hit` or `miss`
/// * `rows` - Rows in the response
/// * `duration_seconds` - Time spent
#[allow(clippy::cast_precision_loss)]
pub fn record_dashboard_build(cache: &str, rows: usize, duration_seconds: f64) {
    counter!("finance_dashboard_builds_total", "cache" => cache.to_string()).increment(1);
    histogram!("finance_dashboard_build_seconds", "cache" => cache.to_string())
        .record(duration_seconds);
    histogram!("finance_dashboard_rows").record(rows as f64);
}

/// Record which source answered an exchange rate lookup.
pub fn record_rate_lookup(source: &str) {
    counter!("finance_rate_lookups_total", "source" => source.to_string()).increment(1);
}

// ============================================================================
// Write Metrics
// ============================================================================

/// Record an account edit (`updated`, `noop`, `invalid`).
pub fn record_account_update(outcome: &str) {
    counter!("finance_account_updates_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record a preference write (`create`, `update`, `columns`).
pub fn record_preference_write(operation: &str) {
    counter!("finance_preference_writes_total", "operation" => operation.to_string())
        .increment(1);
}

// ============================================================================
// Localization and HTTP Metrics
// ============================================================================

/// Record a translation key that resolved to itself.
pub fn record_translation_miss(locale: &str) {
    counter!("finance_translation_misses_total", "locale" => locale.to_string()).increment(1);
}

/// Record a handled HTTP request.
pub fn record_http_request(route: &str, status: u16, duration_seconds: f64) {
    counter!(
        "finance_http_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("finance_http_request_seconds", "route" => route.to_string())
        .record(duration_seconds);
}
