//! Observability module for metrics and logging.
//!
//! Prometheus metrics are rendered by the `/metrics` route; logs go through
//! `tracing-subscriber`.

mod metrics;
mod tracing;

pub use self::metrics::{
    MetricsError, get_metrics_handle, init_metrics, record_account_update,
    record_dashboard_build, record_http_request, record_preference_write, record_rate_lookup,
    record_translation_miss,
};
pub use self::tracing::{TracingError, init_tracing};
