use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::error::QuoteError;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%b %d %Y %H:%M:%S%.f",
    "%b %d %Y %H:%M",
    "%B %d, %Y %H:%M:%S%.f",
    "%B %d, %Y %H:%M",
    "%Y%m%dT%H%M%S",
];

// Month-first for slashed dates, as US sellers write them.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%Y%m%d",
];

/// Parse a seller-supplied purchase date.
///
/// Accepts RFC 3339 timestamps (converted to local time), naive date-times
/// in the ISO, slashed, month-name and compact layouts above, and the same
/// layouts without a time (taken as midnight).
pub fn parse_purchase_date(value: &str) -> Result<NaiveDateTime, QuoteError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| QuoteError::InvalidPurchaseDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_space_separated_with_micros() {
        let dt = parse_purchase_date("2021-01-01 23:26:08.712542").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.nanosecond(), 712_542_000);
    }

    #[test]
    fn test_parse_iso_without_fraction() {
        let dt = parse_purchase_date("2022-03-04T05:06:07").unwrap();
        assert_eq!(dt.minute(), 6);
        assert_eq!(dt.second(), 7);
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let dt = parse_purchase_date("2020-02-29").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_rfc3339() {
        assert!(parse_purchase_date("2021-01-01T23:26:08Z").is_ok());
        assert!(parse_purchase_date("2021-01-01T23:26:08+02:00").is_ok());
    }

    #[test]
    fn test_parse_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2021, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        for value in [
            "01/15/2021",
            "2021/01/15",
            "Jan 15 2021",
            "January 15, 2021",
            "Jan 15, 2021",
            "15 January 2021",
            "20210115",
        ] {
            assert_eq!(parse_purchase_date(value), Ok(expected), "{}", value);
        }
    }

    #[test]
    fn test_parse_common_date_time_layouts() {
        let expected = NaiveDate::from_ymd_opt(2021, 1, 15)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();

        for value in [
            "01/15/2021 08:30:00",
            "01/15/2021 08:30",
            "2021/01/15 08:30:00",
            "Jan 15 2021 08:30",
            "January 15, 2021 08:30:00",
            "20210115T083000",
        ] {
            assert_eq!(parse_purchase_date(value), Ok(expected), "{}", value);
        }
    }

    #[test]
    fn test_slashed_dates_are_month_first() {
        let dt = parse_purchase_date("03/04/2020").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2020, 3, 4).unwrap());
        assert!(parse_purchase_date("15/01/2021").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            parse_purchase_date("last summer"),
            Err(QuoteError::InvalidPurchaseDate("last summer".to_string()))
        );
        assert!(parse_purchase_date("2021-13-01").is_err());
        assert!(parse_purchase_date("").is_err());
    }
}
