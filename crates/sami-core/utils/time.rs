//! Millisecond time codec for SAMI sync markers
//!
//! SAMI expresses every timestamp as a plain millisecond count in the
//! `Start` attribute of a `SYNC` element. These helpers convert between that
//! representation and [`Duration`].
//!
//! # Example
//!
//! ```rust
//! use sami_core::utils::time::{compose_duration, duration_to_millis, format_sami_time};
//!
//! let at = compose_duration(0, 1, 30, 250);
//! assert_eq!(duration_to_millis(at), 90_250);
//! assert_eq!(format_sami_time(at), "90250");
//! ```

use std::time::Duration;

use super::errors::{CoreError, Result};

/// Build a duration from clock components
///
/// Components are not range-checked, so `compose_duration(0, 0, 0, 90_000)`
/// is a valid way to express a pure millisecond count.
#[must_use]
pub const fn compose_duration(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Duration {
    let total_secs = hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds);
    Duration::from_secs(total_secs).saturating_add(Duration::from_millis(millis))
}

/// Whole milliseconds in a duration, truncating any sub-millisecond part
#[must_use]
pub fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Format a duration as a SAMI `Start` attribute value
#[must_use]
pub fn format_sami_time(duration: Duration) -> String {
    duration_to_millis(duration).to_string()
}

/// Parse a SAMI `Start` attribute value into a millisecond count
///
/// Surrounding whitespace is ignored. Signs, fractions and units are not
/// part of the format and are rejected.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] if the value is empty or not a
/// non-negative decimal integer.
pub fn parse_millis(value: &str) -> Result<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_time(value, "empty value"));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_time(
            value,
            "expected a decimal millisecond count",
        ));
    }

    trimmed
        .parse::<u64>()
        .map_err(|e| CoreError::invalid_time(value, &e.to_string()))
}

/// Parse a SAMI `Start` attribute value straight into a duration
///
/// # Errors
///
/// Same conditions as [`parse_millis`].
pub fn parse_sami_time(value: &str) -> Result<Duration> {
    parse_millis(value).map(|ms| compose_duration(0, 0, 0, ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_mixes_components() {
        assert_eq!(compose_duration(1, 2, 3, 4), Duration::from_millis(3_723_004));
        assert_eq!(compose_duration(0, 0, 0, 1500), Duration::from_millis(1500));
    }

    #[test]
    fn millis_truncate_sub_millisecond_part() {
        let d = Duration::from_micros(1_999);
        assert_eq!(duration_to_millis(d), 1);
        assert_eq!(format_sami_time(d), "1");
    }

    #[test]
    fn parse_accepts_padded_digits() {
        assert_eq!(parse_millis(" 4000 ").unwrap(), 4000);
        assert_eq!(parse_millis("0").unwrap(), 0);
        assert_eq!(
            parse_sami_time("1000").unwrap(),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse_millis(""), Err(CoreError::InvalidTime(_))));
        assert!(matches!(parse_millis("-5"), Err(CoreError::InvalidTime(_))));
        assert!(matches!(parse_millis("1.5"), Err(CoreError::InvalidTime(_))));
        assert!(matches!(parse_millis("10ms"), Err(CoreError::InvalidTime(_))));
        assert!(parse_millis("99999999999999999999999").is_err());
    }

    #[test]
    fn format_round_trips_through_parse() {
        let d = compose_duration(2, 0, 59, 999);
        assert_eq!(parse_sami_time(&format_sami_time(d)).unwrap(), d);
    }
}
