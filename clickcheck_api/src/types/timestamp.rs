use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses an ISO-8601 timestamp as sent by the API.
///
/// Accepts RFC 3339 with an offset, or a naive timestamp which is taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
