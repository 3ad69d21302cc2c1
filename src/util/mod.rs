//! Utility modules for timerange.

mod time_parser;

pub use time_parser::{TimeParseError, parse_endpoint};
