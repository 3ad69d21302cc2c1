//! Parser for custom range endpoints.
//!
//! Supports multiple formats, all resolved to epoch milliseconds:
//! - Epoch milliseconds: `1738944000000`
//! - Relative: `-15m`, `-2h`, `-3d`, `-1w`, `-30s`
//! - ISO 8601 / RFC 3339: `2026-02-07T17:00:00`, `2026-02-07T17:00:00+02:00`
//! - Date+time (UTC): `2026-02-07:07:00` or `2026-02-07:07:00:00`

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::clock::{Clock, MILLIS_PER_MINUTE};

/// Error type for time parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParseError {
    pub input: String,
    pub message: String,
}

impl std::fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse time '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for TimeParseError {}

/// Parses a range endpoint into epoch milliseconds.
///
/// Relative expressions are offsets from `clock`'s current time.
///
/// # Supported formats
///
/// | Format | Example | Description |
/// |--------|---------|-------------|
/// | Epoch millis | `1738944000000` | Milliseconds since epoch |
/// | Relative | `-15m`, `-2h`, `-3d` | Relative to now |
/// | ISO 8601 | `2026-02-07T17:00:00` | UTC unless an offset is given |
/// | Date+time | `2026-02-07:07:00` | UTC, colon separator |
/// | Date+time+sec | `2026-02-07:07:00:00` | UTC, with seconds |
///
/// # Examples
///
/// ```
/// use timerange::FixedClock;
/// use timerange::util::parse_endpoint;
///
/// let clock = FixedClock(1_738_944_000_000);
/// assert_eq!(parse_endpoint("-1h", &clock).unwrap(), 1_738_944_000_000 - 3_600_000);
/// assert_eq!(parse_endpoint("1000", &clock).unwrap(), 1000);
/// ```
pub fn parse_endpoint<C: Clock>(input: &str, clock: C) -> Result<i64, TimeParseError> {
    let input = input.trim();

    if let Some(ms) = try_parse_epoch_millis(input) {
        return Ok(ms);
    }

    if let Some(delta_ms) = try_parse_relative_delta_millis(input) {
        return clock
            .now_millis()
            .checked_add(delta_ms)
            .ok_or(TimeParseError {
                input: input.to_string(),
                message: "Relative time overflow".to_string(),
            });
    }

    if let Some(ms) = try_parse_iso8601(input) {
        return Ok(ms);
    }

    if let Some(ms) = try_parse_date_colon_time(input) {
        return Ok(ms);
    }

    Err(TimeParseError {
        input: input.to_string(),
        message: "Unrecognized format. Use: ISO 8601 (2026-02-07T17:00:00), \
                  epoch millis (1738944000000), relative (-15m, -2h, -3d), \
                  or date:time (2026-02-07:07:00)"
            .to_string(),
    })
}

fn try_parse_epoch_millis(input: &str) -> Option<i64> {
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        input.parse::<i64>().ok()
    } else {
        None
    }
}

/// Parses `-<n><unit>` and returns the (negative) offset in milliseconds.
fn try_parse_relative_delta_millis(input: &str) -> Option<i64> {
    let rest = input.strip_prefix('-')?;
    let unit = rest.chars().last()?;
    let number_str = &rest[..rest.len() - unit.len_utf8()];
    if number_str.is_empty() || !number_str.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let number: i64 = number_str.parse().ok()?;

    let unit_ms = match unit {
        's' => 1_000,
        'm' => MILLIS_PER_MINUTE,
        'h' => 60 * MILLIS_PER_MINUTE,
        'd' => 24 * 60 * MILLIS_PER_MINUTE,
        'w' => 7 * 24 * 60 * MILLIS_PER_MINUTE,
        _ => return None,
    };

    number.checked_mul(unit_ms).map(|ms| -ms)
}

fn try_parse_iso8601(input: &str) -> Option<i64> {
    if !input.contains('T') {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).timestamp_millis());
    }

    // No offset: assume UTC
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Utc.from_utc_datetime(&ndt).timestamp_millis());
        }
    }

    None
}

/// Parses `YYYY-MM-DD:HH:MM` or `YYYY-MM-DD:HH:MM:SS` (UTC).
fn try_parse_date_colon_time(input: &str) -> Option<i64> {
    let date_part = input.get(..10)?;
    let time_part = input.get(10..)?.strip_prefix(':')?;

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let time = match time_part.len() {
        5 => NaiveTime::parse_from_str(time_part, "%H:%M").ok()?,
        8 => NaiveTime::parse_from_str(time_part, "%H:%M:%S").ok()?,
        _ => return None,
    };

    let datetime = NaiveDateTime::new(date, time);
    Some(Utc.from_utc_datetime(&datetime).timestamp_millis())
}
