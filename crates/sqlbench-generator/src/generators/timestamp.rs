//! Timestamp value generators.

use chrono::{DateTime, Utc};
use rand::Rng;
use sqlbench_core::Value;

/// Generate a random timestamp between two unix-second bounds
/// (inclusive). Bounds are validated at rule compilation.
pub fn generate_timestamp_range<R: Rng>(rng: &mut R, start_secs: i64, end_secs: i64) -> Value {
    let random_secs = rng.gen_range(start_secs..=end_secs);
    // In-range unix seconds always convert back
    let dt = DateTime::from_timestamp(random_secs, 0)
        .unwrap_or_else(|| DateTime::from_timestamp(start_secs, 0).unwrap_or_default());
    Value::Timestamp(dt)
}

/// Parse a timestamp bound in RFC 3339 or date-only format.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common date-only format
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}
