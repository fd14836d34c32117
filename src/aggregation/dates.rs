use std::fmt;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};
use crate::errors::ReportError;

const LOCAL_DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses a request date: a full ISO-8601 date-time first, then a plain
/// calendar date taken as the start of that day. Times without an offset
/// are read as UTC.
pub fn parse_request_date(literal: &str) -> Result<DateTime<Utc>, ReportError> {
    let trimmed = literal.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(ReportError::BadRequest(format!(
        "Invalid date '{}': expected an ISO-8601 date (yyyy-mm-dd) or date-time",
        literal
    )))
}

fn round_up_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = ts.trunc_subsecs(6);
    if truncated < ts {
        truncated + Duration::microseconds(1)
    } else {
        truncated
    }
}

/// Inclusive range of last-changed timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::BadRequest(format!(
                "startDate {} is after endDate {}",
                start.format("%Y-%m-%dT%H:%M:%S"),
                end.format("%Y-%m-%dT%H:%M:%S")
            )));
        }
        // Bounds snap inward to the microsecond precision the store keeps
        Ok(Self { start: round_up_to_micros(start), end: end.trunc_subsecs(6) })
    }

    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        self.start <= *ts && *ts <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} and {}",
            self.start.format("%Y-%m-%dT%H:%M:%S"),
            self.end.format("%Y-%m-%dT%H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_plain_date_is_start_of_day() {
        let ts = parse_request_date("2024-01-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_local_date_time() {
        assert_eq!(
            parse_request_date("2024-03-05T14:30:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
        );
        assert_eq!(
            parse_request_date("2024-03-05T14:30").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
        );
        assert!(parse_request_date("2024-03-05T14:30:00.250").is_ok());
    }

    #[test]
    fn test_parse_offset_date_time_converts_to_utc() {
        let ts = parse_request_date("2024-03-05T14:30:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid_echoes_literal() {
        let err = parse_request_date("01.02.2024").unwrap_err();
        assert!(matches!(err, ReportError::BadRequest(_)));
        assert!(err.to_string().contains("'01.02.2024'"));
        assert!(parse_request_date("2024-02-30").is_err());
        assert!(parse_request_date("").is_err());
    }

    #[test]
    fn test_range_rejects_start_after_end() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(DateRange::new(start, end), Err(ReportError::BadRequest(_))));
    }

    #[test]
    fn test_single_instant_range_contains_its_bound() {
        let day = parse_request_date("2024-01-01").unwrap();
        let range = DateRange::new(day, day).unwrap();
        assert!(range.contains(&day));
        assert!(!range.contains(&(day + chrono::Duration::microseconds(1))));
    }

    #[test]
    fn test_range_bounds_snap_to_microseconds() {
        let start = parse_request_date("2024-01-10T12:00:00.0000005Z").unwrap();
        let end = parse_request_date("2024-01-10T12:00:01.0000009Z").unwrap();
        let range = DateRange::new(start, end).unwrap();

        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap() + Duration::microseconds(1));
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 1).unwrap());
        assert!(!range.contains(&Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()));
    }
}
