//! timerange - relative time-range resolution for dashboard queries.
//!
//! Turns a symbolic interval selector (`15min`, `6hr`, `2weeks`, `custom`, ...)
//! into an absolute `[minTime, maxTime]` pair in nanosecond-scaled units,
//! anchored to the wall clock at call time.
//!
//! The library is shared by:
//! - query builders that need a concrete window for a data fetch
//! - `timerange` - command-line resolver

pub mod clock;
pub mod interval;
pub mod resolver;
pub mod util;

pub use clock::{Clock, FixedClock, SystemClock, minutes_ago};
pub use interval::{Interval, InvalidIntervalError};
pub use resolver::{
    CustomRange, CustomRangeError, NANOS_PER_MILLI, ResolvedRange, resolve, resolve_str,
    resolve_str_with_clock, resolve_with_clock,
};
