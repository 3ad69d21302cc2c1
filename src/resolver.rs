//! Resolution of interval selectors into absolute time windows.
//!
//! The resolver is a pure function of (selector, wall clock, optional custom
//! range). Outputs are epoch milliseconds scaled by [`NANOS_PER_MILLI`], the
//! unit downstream query requests expect.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::clock::{Clock, SystemClock, minutes_ago};
use crate::interval::{Interval, InvalidIntervalError};

/// Scale applied to millisecond timestamps before they are returned.
pub const NANOS_PER_MILLI: i64 = 1_000_000;

/// Explicit `[start, end]` bounds in epoch milliseconds, used by `custom`.
///
/// Either element may be missing; missing elements resolve to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// Error returned by [`CustomRange::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomRangeError {
    /// Start bound is missing.
    MissingStart,
    /// End bound is missing.
    MissingEnd,
    /// Start is after end.
    Inverted { start: i64, end: i64 },
}

impl fmt::Display for CustomRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomRangeError::MissingStart => write!(f, "custom range has no start"),
            CustomRangeError::MissingEnd => write!(f, "custom range has no end"),
            CustomRangeError::Inverted { start, end } => {
                write!(f, "custom range start {} is after end {}", start, end)
            }
        }
    }
}

impl std::error::Error for CustomRangeError {}

impl CustomRange {
    /// Creates a range with both bounds set.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Bounds with missing elements replaced by `0`.
    pub fn bounds(&self) -> (i64, i64) {
        (self.start.unwrap_or(0), self.end.unwrap_or(0))
    }

    /// Rejects ranges with a missing bound or `start > end`.
    ///
    /// The resolver itself never calls this; it is for callers that want
    /// malformed ranges reported instead of silently resolved.
    pub fn validate(&self) -> Result<(i64, i64), CustomRangeError> {
        let start = self.start.ok_or(CustomRangeError::MissingStart)?;
        let end = self.end.ok_or(CustomRangeError::MissingEnd)?;
        if start > end {
            return Err(CustomRangeError::Inverted { start, end });
        }
        Ok((start, end))
    }
}

/// Absolute time window, both bounds in epoch-nanosecond-equivalent units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRange {
    pub min_time: i64,
    pub max_time: i64,
}

impl ResolvedRange {
    /// Builds a resolved range from millisecond bounds.
    pub fn from_millis(min_ms: i64, max_ms: i64) -> Self {
        Self {
            min_time: min_ms.saturating_mul(NANOS_PER_MILLI),
            max_time: max_ms.saturating_mul(NANOS_PER_MILLI),
        }
    }

    /// Lower bound in epoch milliseconds.
    pub fn min_millis(&self) -> i64 {
        self.min_time / NANOS_PER_MILLI
    }

    /// Upper bound in epoch milliseconds.
    pub fn max_millis(&self) -> i64 {
        self.max_time / NANOS_PER_MILLI
    }

    /// Length of the window; zero for inverted ranges.
    pub fn duration(&self) -> Duration {
        let nanos = self.max_time.saturating_sub(self.min_time).max(0);
        Duration::from_nanos(nanos as u64)
    }

    /// Whether `min_time > max_time`, possible only for custom ranges.
    pub fn is_inverted(&self) -> bool {
        self.min_time > self.max_time
    }
}

/// Resolves `interval` against the system clock.
///
/// `custom` is only consulted when `interval` is [`Interval::Custom`].
pub fn resolve(interval: Interval, custom: Option<CustomRange>) -> ResolvedRange {
    resolve_with_clock(&SystemClock, interval, custom)
}

/// Resolves `interval` against `clock`.
///
/// The clock is read once, so for every relative selector
/// `max_time - min_time` is exactly the selector's duration.
///
/// # Examples
///
/// ```
/// use timerange::{CustomRange, FixedClock, Interval, resolve_with_clock};
///
/// let clock = FixedClock(1_738_944_000_000);
///
/// let range = resolve_with_clock(&clock, Interval::Min15, None);
/// assert_eq!(range.max_time, 1_738_944_000_000 * 1_000_000);
/// assert_eq!(range.min_time, (1_738_944_000_000 - 15 * 60_000) * 1_000_000);
///
/// let range = resolve_with_clock(&clock, Interval::Custom, Some(CustomRange::new(1000, 2000)));
/// assert_eq!((range.min_time, range.max_time), (1_000_000_000, 2_000_000_000));
/// ```
pub fn resolve_with_clock<C: Clock>(
    clock: C,
    interval: Interval,
    custom: Option<CustomRange>,
) -> ResolvedRange {
    let range = match interval.minutes() {
        Some(minutes) => {
            let now = clock.now_millis();
            ResolvedRange::from_millis(minutes_ago(now, minutes), now)
        }
        None => {
            let (start, end) = custom.unwrap_or_default().bounds();
            let range = ResolvedRange::from_millis(start, end);
            if range.is_inverted() {
                warn!("custom range is inverted: start={} end={}", start, end);
            }
            range
        }
    };

    trace!(
        "resolved {}: min_time={} max_time={}",
        interval, range.min_time, range.max_time
    );
    range
}

/// Parses `selector` and resolves it against the system clock.
///
/// Fails with [`InvalidIntervalError`] when the token is not a known selector.
pub fn resolve_str(
    selector: &str,
    custom: Option<CustomRange>,
) -> Result<ResolvedRange, InvalidIntervalError> {
    resolve_str_with_clock(&SystemClock, selector, custom)
}

/// Parses `selector` and resolves it against `clock`.
pub fn resolve_str_with_clock<C: Clock>(
    clock: C,
    selector: &str,
    custom: Option<CustomRange>,
) -> Result<ResolvedRange, InvalidIntervalError> {
    let interval: Interval = selector.parse()?;
    Ok(resolve_with_clock(clock, interval, custom))
}
