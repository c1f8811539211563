//! Timestamp coercion.
//!
//! The fulfillment API has emitted creation and shipping times as RFC 3339
//! strings, bare datetimes, dates, and numeric epochs in both seconds and
//! milliseconds. Everything funnels through [`coerce_datetime`]; an
//! unparsable value is absent, never passed through.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Epoch values below this magnitude are seconds; at or above, milliseconds.
/// 10,000,000,000 seconds is year 2286, far past any order in the system.
const EPOCH_MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// Coerce a raw value to a UTC timestamp.
pub(crate) fn coerce_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = if let Some(i) = n.as_i64() {
                if i.abs() < EPOCH_MILLIS_THRESHOLD {
                    i.checked_mul(1000)?
                } else {
                    i
                }
            } else {
                epoch_millis_from_f64(n.as_f64()?)?
            };
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(s) => parse_datetime(s),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn epoch_millis_from_f64(epoch: f64) -> Option<i64> {
    if !epoch.is_finite() {
        return None;
    }
    let millis = if epoch.abs() < EPOCH_MILLIS_THRESHOLD as f64 {
        epoch * 1000.0
    } else {
        epoch
    };
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(millis as i64)
}

/// Parse a timestamp string.
///
/// RFC 3339 is what the API documents; the remaining formats cover payloads
/// observed from older integrations. Bare datetimes and dates are taken as
/// UTC.
pub(crate) fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}
