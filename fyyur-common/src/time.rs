//! Timestamp utilities
//!
//! Show times are naive local timestamps, so "now" is read from the local
//! clock. Everything that classifies shows as past or upcoming receives the
//! instant explicitly; handlers obtain it from a [`Clock`].

use chrono::{Local, NaiveDateTime};

/// Canonical text form of a show start time
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the evaluation instant
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant (tests, reproducible renders)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Format a timestamp the way show listings display it
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a submitted start time
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM` and the HTML
/// `datetime-local` forms `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        TIMESTAMP_FORMAT,
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    let value = value.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_fixed_clock_returns_pinned_instant() {
        let instant = at(2019, 5, 21, 21, 30, 0);
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_returns_recent_timestamp() {
        let now = SystemClock.now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(now > at(2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&at(2019, 5, 21, 21, 30, 0)), "2019-05-21 21:30:00");
    }

    #[test]
    fn test_parse_timestamp_accepted_forms() {
        let expected = at(2035, 4, 1, 20, 0, 0);
        assert_eq!(parse_timestamp("2035-04-01 20:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2035-04-01 20:00"), Some(expected));
        assert_eq!(parse_timestamp("2035-04-01T20:00"), Some(expected));
        assert_eq!(parse_timestamp("  2035-04-01T20:00:00 "), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("tomorrow night"), None);
        assert_eq!(parse_timestamp("2035-13-01 20:00:00"), None);
    }
}
