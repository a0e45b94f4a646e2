use chrono::{NaiveDateTime, Weekday};

use crate::{Error, Result};

/// Parse Burp's capture time (`Wed Jun 14 10:22:05 UTC 2023`) into
/// milliseconds since the Unix epoch.
///
/// The zone abbreviation must be present but is read as a zero offset,
/// and the weekday is checked for spelling only.
pub fn parse_timestamp_millis(text: &str) -> Result<i64> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [weekday, month, day, clock, zone, year] = fields.as_slice() else {
        return Err(invalid(
            text,
            format!("expected 6 fields, found {}", fields.len()),
        ));
    };

    weekday
        .parse::<Weekday>()
        .map_err(|_| invalid(text, format!("unknown weekday '{}'", weekday)))?;

    if !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid(text, format!("unknown time zone '{}'", zone)));
    }

    let normalized = format!("{} {} {} {}", month, day, clock, year);
    let parsed = NaiveDateTime::parse_from_str(&normalized, "%b %d %H:%M:%S %Y")
        .map_err(|err| invalid(text, err.to_string()))?;

    Ok(parsed.and_utc().timestamp_millis())
}

fn invalid(text: &str, reason: String) -> Error {
    Error::Timestamp {
        value: text.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_instant() {
        assert_eq!(
            parse_timestamp_millis("Wed Jun 14 10:22:05 UTC 2023").unwrap(),
            1_686_738_125_000
        );
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(
            parse_timestamp_millis("Thu Feb 29 23:59:59 UTC 2024").unwrap(),
            1_709_251_199_000
        );
    }

    #[test]
    fn test_zone_abbreviation_is_read_as_utc() {
        assert_eq!(
            parse_timestamp_millis("Wed Jun 14 10:22:05 CEST 2023").unwrap(),
            parse_timestamp_millis("Wed Jun 14 10:22:05 UTC 2023").unwrap()
        );
    }

    #[test]
    fn test_weekday_is_not_cross_checked() {
        assert_eq!(
            parse_timestamp_millis("Mon Jun 14 10:22:05 UTC 2023").unwrap(),
            1_686_738_125_000
        );
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        let err = parse_timestamp_millis("2023-06-14T10:22:05Z").unwrap_err();
        assert!(err.to_string().contains("expected 6 fields, found 1"));
    }

    #[test]
    fn test_rejects_unknown_weekday() {
        assert!(parse_timestamp_millis("Xyz Jun 14 10:22:05 UTC 2023").is_err());
    }

    #[test]
    fn test_rejects_numeric_zone() {
        assert!(parse_timestamp_millis("Wed Jun 14 10:22:05 +0200 2023").is_err());
    }

    #[test]
    fn test_rejects_bad_month_and_clock() {
        assert!(parse_timestamp_millis("Wed Foo 14 10:22:05 UTC 2023").is_err());
        assert!(parse_timestamp_millis("Wed Jun 14 25:22:05 UTC 2023").is_err());
        assert!(parse_timestamp_millis("Wed Jun 31 10:22:05 UTC 2023").is_err());
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(parse_timestamp_millis("").is_err());
    }
}
