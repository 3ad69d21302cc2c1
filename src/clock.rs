//! Wall-clock abstraction.
//!
//! The `Clock` trait lets the resolver read "now" from the real system clock
//! in production and from a frozen instant in tests.

use chrono::Utc;

/// Milliseconds in one minute.
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Real clock backed by `chrono::Utc::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new `SystemClock` instance.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a fixed instant (epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Returns the instant `minutes` minutes before `now_ms`, in epoch milliseconds.
pub fn minutes_ago(now_ms: i64, minutes: i64) -> i64 {
    now_ms.saturating_sub(minutes.saturating_mul(MILLIS_PER_MINUTE))
}
