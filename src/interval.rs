//! Interval selectors offered by the time picker.
//!
//! Each selector is a symbolic token (`15min`, `6hr`, `2weeks`, ...) standing for
//! "the last N minutes", plus `custom` for an explicit caller-supplied range.
//!
//! | Token | Minutes |
//! |-------|---------|
//! | `1min` .. `45min` | 1, 5, 10, 15, 30, 45 |
//! | `1hr`, `3hr`, `4hr`, `6hr`, `12hr` | hours × 60 |
//! | `1day`, `3days`, `4days`, `10days` | days × 1440 |
//! | `1week`, `2weeks`, `6weeks` | weeks × 10080 |
//! | `2months` | 86400 (60 days) |
//! | `custom` | none |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Error returned when a selector token is not one of the known intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIntervalError {
    pub input: String,
}

impl fmt::Display for InvalidIntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time type '{}'", self.input)
    }
}

impl std::error::Error for InvalidIntervalError {}

/// Relative interval selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1min")]
    Min1,
    #[serde(rename = "5min")]
    Min5,
    #[serde(rename = "10min")]
    Min10,
    #[serde(rename = "15min")]
    Min15,
    #[serde(rename = "30min")]
    Min30,
    #[serde(rename = "45min")]
    Min45,
    #[serde(rename = "1hr")]
    Hour1,
    #[serde(rename = "3hr")]
    Hour3,
    #[serde(rename = "4hr")]
    Hour4,
    #[serde(rename = "6hr")]
    Hour6,
    #[serde(rename = "12hr")]
    Hour12,
    #[serde(rename = "1day")]
    Day1,
    #[serde(rename = "3days")]
    Days3,
    #[serde(rename = "4days")]
    Days4,
    #[serde(rename = "10days")]
    Days10,
    #[serde(rename = "1week")]
    Week1,
    #[serde(rename = "2weeks")]
    Weeks2,
    #[serde(rename = "6weeks")]
    Weeks6,
    #[serde(rename = "2months")]
    Months2,
    /// Explicit range supplied by the caller.
    #[serde(rename = "custom")]
    Custom,
}

impl Interval {
    /// Every selector in menu order, shortest first, `custom` last.
    pub const ALL: [Interval; 20] = [
        Interval::Min1,
        Interval::Min5,
        Interval::Min10,
        Interval::Min15,
        Interval::Min30,
        Interval::Min45,
        Interval::Hour1,
        Interval::Hour3,
        Interval::Hour4,
        Interval::Hour6,
        Interval::Hour12,
        Interval::Day1,
        Interval::Days3,
        Interval::Days4,
        Interval::Week1,
        Interval::Days10,
        Interval::Weeks2,
        Interval::Weeks6,
        Interval::Months2,
        Interval::Custom,
    ];

    /// Canonical token for this selector.
    pub const fn as_str(self) -> &'static str {
        match self {
            Interval::Min1 => "1min",
            Interval::Min5 => "5min",
            Interval::Min10 => "10min",
            Interval::Min15 => "15min",
            Interval::Min30 => "30min",
            Interval::Min45 => "45min",
            Interval::Hour1 => "1hr",
            Interval::Hour3 => "3hr",
            Interval::Hour4 => "4hr",
            Interval::Hour6 => "6hr",
            Interval::Hour12 => "12hr",
            Interval::Day1 => "1day",
            Interval::Days3 => "3days",
            Interval::Days4 => "4days",
            Interval::Days10 => "10days",
            Interval::Week1 => "1week",
            Interval::Weeks2 => "2weeks",
            Interval::Weeks6 => "6weeks",
            Interval::Months2 => "2months",
            Interval::Custom => "custom",
        }
    }

    /// Minutes to subtract from "now" to get the start of the window.
    ///
    /// Returns `None` for [`Interval::Custom`], which carries its own bounds.
    /// `2months` is a flat 60 days, not a calendar span.
    pub const fn minutes(self) -> Option<i64> {
        let minutes = match self {
            Interval::Min1 => 1,
            Interval::Min5 => 5,
            Interval::Min10 => 10,
            Interval::Min15 => 15,
            Interval::Min30 => 30,
            Interval::Min45 => 45,
            Interval::Hour1 => MINUTES_PER_HOUR,
            Interval::Hour3 => 3 * MINUTES_PER_HOUR,
            Interval::Hour4 => 4 * MINUTES_PER_HOUR,
            Interval::Hour6 => 6 * MINUTES_PER_HOUR,
            Interval::Hour12 => 12 * MINUTES_PER_HOUR,
            Interval::Day1 => MINUTES_PER_DAY,
            Interval::Days3 => 3 * MINUTES_PER_DAY,
            Interval::Days4 => 4 * MINUTES_PER_DAY,
            Interval::Days10 => 10 * MINUTES_PER_DAY,
            Interval::Week1 => 7 * MINUTES_PER_DAY,
            Interval::Weeks2 => 14 * MINUTES_PER_DAY,
            Interval::Weeks6 => 42 * MINUTES_PER_DAY,
            Interval::Months2 => 60 * MINUTES_PER_DAY,
            Interval::Custom => return None,
        };
        Some(minutes)
    }

    /// Human-readable label for pickers.
    pub const fn label(self) -> &'static str {
        match self {
            Interval::Min1 => "Last 1 min",
            Interval::Min5 => "Last 5 min",
            Interval::Min10 => "Last 10 min",
            Interval::Min15 => "Last 15 min",
            Interval::Min30 => "Last 30 min",
            Interval::Min45 => "Last 45 min",
            Interval::Hour1 => "Last 1 hr",
            Interval::Hour3 => "Last 3 hr",
            Interval::Hour4 => "Last 4 hr",
            Interval::Hour6 => "Last 6 hr",
            Interval::Hour12 => "Last 12 hr",
            Interval::Day1 => "Last 1 day",
            Interval::Days3 => "Last 3 days",
            Interval::Days4 => "Last 4 days",
            Interval::Days10 => "Last 10 days",
            Interval::Week1 => "Last 1 week",
            Interval::Weeks2 => "Last 2 weeks",
            Interval::Weeks6 => "Last 6 weeks",
            Interval::Months2 => "Last 2 months",
            Interval::Custom => "Custom",
        }
    }

    /// Whether this selector takes its bounds from a custom range.
    pub const fn is_custom(self) -> bool {
        matches!(self, Interval::Custom)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = InvalidIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| InvalidIntervalError {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_table() {
        let expected = [
            ("1min", 1),
            ("5min", 5),
            ("10min", 10),
            ("15min", 15),
            ("30min", 30),
            ("45min", 45),
            ("1hr", 60),
            ("1day", 1440),
            ("3days", 4320),
            ("4days", 5760),
            ("10days", 14400),
            ("1week", 10080),
            ("2weeks", 20160),
            ("6weeks", 60480),
            ("2months", 86400),
        ];
        for (token, minutes) in expected {
            let interval: Interval = token.parse().unwrap();
            assert_eq!(interval.minutes(), Some(minutes), "{}", token);
        }
    }

    #[test]
    fn test_hour_selectors() {
        assert_eq!(Interval::Hour3.minutes(), Some(3 * 60));
        assert_eq!(Interval::Hour4.minutes(), Some(4 * 60));
        assert_eq!(Interval::Hour6.minutes(), Some(6 * 60));
        assert_eq!(Interval::Hour12.minutes(), Some(12 * 60));
    }

    #[test]
    fn test_custom_has_no_duration() {
        assert_eq!(Interval::Custom.minutes(), None);
        assert!(Interval::Custom.is_custom());
        assert!(!Interval::Hour1.is_custom());
    }

    #[test]
    fn test_parse_all_tokens() {
        for interval in Interval::ALL {
            assert_eq!(interval.as_str().parse::<Interval>().unwrap(), interval);
            assert_eq!(interval.to_string(), interval.as_str());
        }
    }

    #[test]
    fn test_padded_tokens_are_rejected() {
        for token in [" 6hr", "6hr ", " 6hr\n", "\t1day"] {
            let err = token.parse::<Interval>().unwrap_err();
            assert_eq!(err.input, token);
            assert!(serde_json::from_str::<Interval>(&format!("{:?}", token)).is_err());
        }
        let err = "  7hr ".parse::<Interval>().unwrap_err();
        assert_eq!(err.input, "  7hr ");
    }

    #[test]
    fn test_parse_invalid_tokens() {
        for token in ["7hr", "", "1HR", "2month", "hr", "-15min"] {
            let err = token.parse::<Interval>().unwrap_err();
            assert_eq!(err.input, token);
        }
        let err = "7hr".parse::<Interval>().unwrap_err();
        assert_eq!(err.to_string(), "invalid time type '7hr'");
    }

    #[test]
    fn test_all_is_sorted_by_duration() {
        let durations: Vec<i64> = Interval::ALL.iter().filter_map(|i| i.minutes()).collect();
        assert_eq!(durations.len(), Interval::ALL.len() - 1);
        assert!(durations.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Interval::ALL.last(), Some(&Interval::Custom));
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&Interval::Weeks2).unwrap();
        assert_eq!(json, "\"2weeks\"");

        let parsed: Interval = serde_json::from_str("\"12hr\"").unwrap();
        assert_eq!(parsed, Interval::Hour12);

        assert!(serde_json::from_str::<Interval>("\"7hr\"").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Interval::Min15.label(), "Last 15 min");
        assert_eq!(Interval::Months2.label(), "Last 2 months");
        assert_eq!(Interval::Custom.label(), "Custom");
    }
}
