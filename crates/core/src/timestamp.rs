//! Timestamp normalization for sort keys.
//!
//! Epoch-millisecond values from the wire are rendered as fixed-width UTC
//! strings (`2024-05-01T12:34:56.123456+0000`). Fixed width and a constant
//! `+0000` offset make lexicographic order equal chronological order, which
//! is what the store's sort keys rely on. The raw integer is kept alongside
//! the string in persisted records, so both must resolve to the same
//! instant.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory][offset_minute]"
);

/// Errors raised while normalizing or parsing timestamps.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("epoch value {millis} is outside the representable range")]
    OutOfRange { millis: i64 },

    #[error("timestamp '{value}' does not match the normalized format")]
    Unparseable { value: String },
}

/// Render an epoch-millisecond value as a normalized UTC string.
pub fn format_epoch_millis(millis: i64) -> Result<String, TimestampError> {
    let instant = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|_| TimestampError::OutOfRange { millis })?;
    instant
        .format(&TIMESTAMP_FORMAT)
        .map_err(|_| TimestampError::OutOfRange { millis })
}

/// Parse a normalized timestamp string back to epoch milliseconds.
///
/// Exact inverse of [`format_epoch_millis`] for every value the formatter
/// accepts.
pub fn parse_timestamp(value: &str) -> Result<i64, TimestampError> {
    let instant =
        OffsetDateTime::parse(value, &TIMESTAMP_FORMAT).map_err(|_| TimestampError::Unparseable {
            value: value.to_string(),
        })?;
    Ok((instant.unix_timestamp_nanos() / 1_000_000) as i64)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero() {
        assert_eq!(
            format_epoch_millis(0).unwrap(),
            "1970-01-01T00:00:00.000000+0000"
        );
    }

    #[test]
    fn subsecond_precision_is_kept() {
        assert_eq!(
            format_epoch_millis(1000).unwrap(),
            "1970-01-01T00:00:01.000000+0000"
        );
        assert_eq!(
            format_epoch_millis(1234567890123).unwrap(),
            "2009-02-13T23:31:30.123000+0000"
        );
    }

    #[test]
    fn round_trips_exactly() {
        for millis in [0, 1, 999, 1000, 1234567890123, 1722470400000] {
            let formatted = format_epoch_millis(millis).unwrap();
            assert_eq!(parse_timestamp(&formatted).unwrap(), millis);
        }
    }

    #[test]
    fn lexicographic_order_is_chronological() {
        let earlier = format_epoch_millis(999).unwrap();
        let later = format_epoch_millis(1000).unwrap();
        assert!(earlier < later);

        let much_later = format_epoch_millis(32503680000000).unwrap(); // year 3000
        assert!(later < much_later);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("not a timestamp").is_err());
        assert!(parse_timestamp("2024-05-01").is_err());
    }

    #[test]
    fn rejects_out_of_range_epoch() {
        assert!(format_epoch_millis(i64::MAX).is_err());
    }
}
