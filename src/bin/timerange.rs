//! timerange - resolve dashboard interval selectors from the command line.
//!
//! Usage:
//!   timerange                          # last 15 minutes (or $TIMERANGE_INTERVAL)
//!   timerange 6hr                      # last 6 hours
//!   timerange 2weeks --json            # {"minTime":...,"maxTime":...}
//!   timerange custom -s -2h -e -1h     # explicit window
//!   timerange 7hr --fallback 1hr       # unknown selector falls back to 1hr
//!   timerange --list                   # all selectors

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::EnvFilter;

use timerange::util::parse_endpoint;
use timerange::{Clock, CustomRange, Interval, ResolvedRange, SystemClock, resolve_with_clock};

/// Selector used when none is given on the command line or in the environment.
const DEFAULT_INTERVAL: &str = "15min";

/// Resolve dashboard time selectors into absolute ranges.
#[derive(Parser)]
#[command(name = "timerange", about = "Resolve dashboard time selectors", version)]
struct Args {
    /// Interval selector: 1min, 5min, 10min, 15min, 30min, 45min, 1hr, 3hr, 4hr,
    /// 6hr, 12hr, 1day, 3days, 4days, 10days, 1week, 2weeks, 6weeks, 2months, custom.
    #[arg(value_name = "SELECTOR", env = "TIMERANGE_INTERVAL", default_value = DEFAULT_INTERVAL)]
    selector: String,

    /// Start of a custom range. Supported formats:
    /// - Epoch milliseconds: 1738944000000
    /// - Relative: -15m, -2h, -3d, -1w
    /// - ISO 8601: 2026-02-07T17:00:00
    /// - Date:time: 2026-02-07:07:00
    #[arg(short = 's', long = "start", value_name = "TIME", allow_hyphen_values = true)]
    start: Option<String>,

    /// End of a custom range (same formats as --start).
    #[arg(short = 'e', long = "end", value_name = "TIME", allow_hyphen_values = true)]
    end: Option<String>,

    /// Selector to use when SELECTOR is not recognized.
    #[arg(long, value_name = "SELECTOR", env = "TIMERANGE_FALLBACK")]
    fallback: Option<String>,

    /// Reject custom ranges with a missing bound or start after end.
    #[arg(long)]
    strict: bool,

    /// Output as JSON.
    #[arg(long)]
    json: bool,

    /// List all selectors and exit.
    #[arg(long)]
    list: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr so stdout stays parseable.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = match format!("timerange={}", level).parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn fmt_ts(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn print_selectors() {
    println!("{:<10} {:>8}  LABEL", "SELECTOR", "MINUTES");
    for interval in Interval::ALL {
        let minutes = interval
            .minutes()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<10} {:>8}  {}", interval.as_str(), minutes, interval.label());
    }
}

/// Parses SELECTOR, falling back to `fallback` when it is not recognized.
fn select_interval(selector: &str, fallback: Option<&str>) -> Result<Interval, String> {
    match selector.parse::<Interval>() {
        Ok(interval) => Ok(interval),
        Err(e) => {
            let Some(fallback) = fallback else {
                return Err(e.to_string());
            };
            warn!("{}, falling back to '{}'", e, fallback);
            fallback
                .parse::<Interval>()
                .map_err(|fe| format!("fallback: {}", fe))
        }
    }
}

/// Builds the custom range from `--start`/`--end`.
///
/// Bounds are only parsed for `custom`; for other selectors they are ignored.
/// With `strict`, a missing bound or start after end is an error.
fn custom_range<C: Clock>(
    interval: Interval,
    start: Option<&str>,
    end: Option<&str>,
    strict: bool,
    clock: C,
) -> Result<Option<CustomRange>, String> {
    if !interval.is_custom() {
        if start.is_some() || end.is_some() {
            warn!("--start/--end are ignored for selector '{}'", interval);
        }
        return Ok(None);
    }

    let parse = |value: Option<&str>| {
        value
            .map(|s| parse_endpoint(s, &clock))
            .transpose()
            .map_err(|e| e.to_string())
    };
    let start = parse(start)?;
    let end = parse(end)?;
    let custom = (start.is_some() || end.is_some()).then_some(CustomRange { start, end });

    if strict {
        custom
            .unwrap_or_default()
            .validate()
            .map_err(|e| e.to_string())?;
    }

    Ok(custom)
}

fn print_range(range: &ResolvedRange, json: bool) {
    if json {
        match serde_json::to_string(range) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: failed to serialize range: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{} {}", range.min_time, range.max_time);
    }
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    if args.list {
        print_selectors();
        return;
    }

    let clock = SystemClock::new();

    let interval = match select_interval(&args.selector, args.fallback.as_deref()) {
        Ok(interval) => interval,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let custom = match custom_range(
        interval,
        args.start.as_deref(),
        args.end.as_deref(),
        args.strict,
        &clock,
    ) {
        Ok(custom) => custom,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let range = resolve_with_clock(&clock, interval, custom);
    info!("Resolved '{}' ({})", interval, interval.label());
    debug!(
        "Window: {} .. {} ({}s)",
        fmt_ts(range.min_millis()),
        fmt_ts(range.max_millis()),
        range.duration().as_secs()
    );

    print_range(&range, args.json);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use timerange::FixedClock;

    const NOW: i64 = 1_738_944_000_000;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_select_interval() {
        assert_eq!(select_interval("6hr", None), Ok(Interval::Hour6));
        assert_eq!(select_interval("7hr", Some("1hr")), Ok(Interval::Hour1));
        assert!(select_interval("7hr", None).is_err());
        assert!(select_interval("7hr", Some("8hr")).is_err());
    }

    #[test]
    fn test_bounds_ignored_for_relative_selector() {
        let clock = FixedClock(NOW);
        assert_eq!(
            custom_range(Interval::Hour1, Some("garbage"), None, true, &clock),
            Ok(None)
        );
    }

    #[test]
    fn test_custom_bounds_parsed() {
        let clock = FixedClock(NOW);
        assert_eq!(
            custom_range(Interval::Custom, Some("-2h"), Some("-1h"), true, &clock),
            Ok(Some(CustomRange::new(NOW - 7_200_000, NOW - 3_600_000)))
        );
        assert_eq!(
            custom_range(Interval::Custom, None, None, false, &clock),
            Ok(None)
        );
        assert!(custom_range(Interval::Custom, Some("garbage"), None, false, &clock).is_err());
    }

    #[test]
    fn test_strict_rejects_malformed_custom_range() {
        let clock = FixedClock(NOW);

        let inverted = custom_range(Interval::Custom, Some("2000"), Some("1000"), true, &clock);
        assert_eq!(
            inverted,
            Err("custom range start 2000 is after end 1000".to_string())
        );
        assert!(custom_range(Interval::Custom, Some("1000"), None, true, &clock).is_err());
        assert!(custom_range(Interval::Custom, None, None, true, &clock).is_err());

        // Without --strict the same ranges pass through.
        assert_eq!(
            custom_range(Interval::Custom, Some("2000"), Some("1000"), false, &clock),
            Ok(Some(CustomRange::new(2000, 1000)))
        );
    }

    #[test]
    fn test_parse_custom_args() {
        let args = Args::try_parse_from(["timerange", "custom", "-s", "-2h", "--end", "1000"])
            .unwrap();
        assert_eq!(args.selector, "custom");
        assert_eq!(args.start.as_deref(), Some("-2h"));
        assert_eq!(args.end.as_deref(), Some("1000"));
    }

    #[test]
    fn test_fmt_ts() {
        assert_eq!(fmt_ts(0), "1970-01-01 00:00:00.000 UTC");
        assert_eq!(fmt_ts(1_500), "1970-01-01 00:00:01.500 UTC");
    }
}
