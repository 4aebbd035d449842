//! Cache keys for date-ranged results.

use chrono::NaiveDate;

/// Build the key a date-ranged result is cached under.
///
/// The key is `dcx`, both dates as `yyyyMMdd`, the result name and the
/// last-activity token, so any write produces a new key.
#[must_use]
pub fn cache_key(name: &str, start: NaiveDate, end: NaiveDate, last_activity: &str) -> String {
    format!(
        "dcx{}{}{name}{last_activity}",
        start.format("%Y%m%d"),
        end.format("%Y%m%d"),
    )
}
