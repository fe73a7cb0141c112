//! Date helper functions
//!
//! Content dates are calendar dates written by hand in front-matter. They are
//! parsed leniently, normalized to `YYYY-MM-DD`, and formatted for feeds and
//! display. Anything unparseable renders as [`INVALID_DATE`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Text emitted in place of a date that could not be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Atom timestamp layout, always in UTC
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parse a date string in the formats authors actually write
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 with an explicit offset keeps its calendar date
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Normalize to `YYYY-MM-DD`, or `None` if the string is not a date
pub fn normalize_date(s: &str) -> Option<String> {
    parse_date(s).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Midnight (or the given time) in the site timezone, as UTC
fn to_utc(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let naive = parse_date(s)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// RFC 1123 timestamp for RSS `pubDate`, e.g. `Sun, 01 Jun 2025 00:00:00 GMT`
pub fn rfc1123(s: &str, tz: Tz) -> String {
    to_utc(s, tz)
        .map(|dt| dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// ISO 8601 timestamp for Atom `updated`, e.g. `2025-06-01T00:00:00.000Z`
pub fn iso8601(s: &str, tz: Tz) -> String {
    to_utc(s, tz)
        .map(|dt| dt.format(ISO8601_FORMAT).to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// "Month Year" label, e.g. `June 2025`
pub fn month_label(s: &str) -> String {
    parse_date(s)
        .map(|dt| dt.format("%B %Y").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Long display format, e.g. `June 1, 2025`
pub fn full_date(s: &str) -> String {
    parse_date(s)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Parse an IANA timezone name, falling back to UTC
pub fn parse_timezone(name: &str) -> Tz {
    if name.trim().is_empty() {
        return Tz::UTC;
    }
    name.parse::<Tz>().unwrap_or_else(|_| {
        tracing::warn!("Unknown timezone {:?}, using UTC", name);
        Tz::UTC
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2025-06-01").as_deref(), Some("2025-06-01"));
        assert_eq!(normalize_date("2025/6/1").as_deref(), Some("2025-06-01"));
        assert_eq!(
            normalize_date("2025-06-01 10:30:00").as_deref(),
            Some("2025-06-01")
        );
        assert_eq!(
            normalize_date("2025-06-01T23:30:00+02:00").as_deref(),
            Some("2025-06-01")
        );
        assert_eq!(normalize_date("June 1, 2025").as_deref(), Some("2025-06-01"));
        assert_eq!(normalize_date("someday"), None);
    }

    #[test]
    fn test_rfc1123() {
        assert_eq!(
            rfc1123("2025-06-01", Tz::UTC),
            "Sun, 01 Jun 2025 00:00:00 GMT"
        );
        assert_eq!(
            rfc1123("2025-06-01", chrono_tz::Europe::Berlin),
            "Sat, 31 May 2025 22:00:00 GMT"
        );
        assert_eq!(rfc1123("not a date", Tz::UTC), INVALID_DATE);
    }

    #[test]
    fn test_iso8601() {
        assert_eq!(iso8601("2025-06-01", Tz::UTC), "2025-06-01T00:00:00.000Z");
        assert_eq!(iso8601("???", Tz::UTC), INVALID_DATE);
    }

    #[test]
    fn test_labels() {
        assert_eq!(month_label("2025-06-15"), "June 2025");
        assert_eq!(full_date("2025-06-01"), "June 1, 2025");
        assert_eq!(month_label("nope"), INVALID_DATE);
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone(""), Tz::UTC);
        assert_eq!(parse_timezone("Asia/Tokyo"), chrono_tz::Asia::Tokyo);
        assert_eq!(parse_timezone("Mars/Olympus"), Tz::UTC);
    }
}
