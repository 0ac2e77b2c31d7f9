// src/timeline/date.rs
// =============================================================================
// Formats commit timestamps for the timeline.
//
// All times are shown in Indian Standard Time (Asia/Kolkata, UTC+05:30),
// whatever the viewer's own timezone is. The same input always produces the
// same two strings.
//
// Example:
//   "2024-03-15T10:30:00Z" -> date "Mar 15, 2024", time "4:00 PM"
// =============================================================================

use chrono::DateTime;
use chrono_tz::Asia::Kolkata;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid timestamp '{input}': {source}")]
pub struct DateError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

/// A timestamp split into the two labels shown next to a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDate {
    /// "Mar 15, 2024"
    pub date_str: String,
    /// "4:00 PM"
    pub time_str: String,
}

pub fn format_date_details(iso: &str) -> Result<FormattedDate, DateError> {
    let parsed = DateTime::parse_from_rfc3339(iso).map_err(|source| DateError {
        input: iso.to_string(),
        source,
    })?;
    let local = parsed.with_timezone(&Kolkata);

    Ok(FormattedDate {
        date_str: local.format("%b %-d, %Y").to_string(),
        time_str: local.format("%-I:%M %p").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_in_ist() {
        let formatted = format_date_details("2024-03-15T10:30:00Z").unwrap();
        assert_eq!(formatted.date_str, "Mar 15, 2024");
        assert_eq!(formatted.time_str, "4:00 PM");
    }

    #[test]
    fn test_format_is_reproducible() {
        let first = format_date_details("2024-03-15T10:30:00Z").unwrap();
        let second = format_date_details("2024-03-15T10:30:00Z").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_rolls_over_midnight() {
        // 20:00 UTC is 01:30 the next day in IST
        let formatted = format_date_details("2023-12-31T20:00:00Z").unwrap();
        assert_eq!(formatted.date_str, "Jan 1, 2024");
        assert_eq!(formatted.time_str, "1:30 AM");
    }

    #[test]
    fn test_format_respects_source_offset() {
        // Same instant as 10:30Z, written with a US offset
        let formatted = format_date_details("2024-03-15T05:30:00-05:00").unwrap();
        assert_eq!(formatted.time_str, "4:00 PM");
    }

    #[test]
    fn test_format_noon_and_midnight() {
        let noon = format_date_details("2024-06-01T06:30:00Z").unwrap();
        assert_eq!(noon.time_str, "12:00 PM");

        let midnight = format_date_details("2024-06-01T18:30:00Z").unwrap();
        assert_eq!(midnight.date_str, "Jun 2, 2024");
        assert_eq!(midnight.time_str, "12:00 AM");
    }

    #[test]
    fn test_format_rejects_garbage() {
        let err = format_date_details("yesterday").unwrap_err();
        assert_eq!(err.input, "yesterday");
    }
}
