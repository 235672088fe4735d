//! Date mocker.

use crate::config::MockConfig;
use crate::error::MockError;
use crate::mocker::Mocker;
use crate::random;
use chrono::{DateTime, NaiveDate, Utc};
use mock_core::MockValue;

/// Uniform instant in `[start, end]`, millisecond resolution.
///
/// Both bounds are resolved when the mocker is built, so a bad pattern fails
/// before any value is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMocker {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateMocker {
    /// Build from a start pattern and an end time, each RFC 3339 or `YYYY-MM-DD`.
    pub fn new(start_pattern: &str, end_time: &str) -> Result<Self, MockError> {
        let start = parse_timestamp(start_pattern)
            .ok_or_else(|| MockError::InvalidDate(start_pattern.to_string()))?;
        let end =
            parse_timestamp(end_time).ok_or_else(|| MockError::InvalidDate(end_time.to_string()))?;
        Self::between(start, end)
    }

    /// Build from already resolved instants.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, MockError> {
        if start > end {
            return Err(MockError::InvalidRange {
                kind: "date",
                min: start.to_rfc3339(),
                max: end.to_rfc3339(),
                reason: "start is after end",
            });
        }
        Ok(Self { start, end })
    }

    /// Build from the config's date range.
    pub fn from_config(config: &MockConfig) -> Result<Self, MockError> {
        let range = config.date_range();
        Self::new(&range.start, &range.end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

impl Mocker for DateMocker {
    fn mock(&self, config: &mut MockConfig) -> Result<MockValue, MockError> {
        let millis = random::next_long(
            config.rng(),
            self.start.timestamp_millis(),
            self.end.timestamp_millis(),
        )?;
        let instant = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| MockError::InvalidDate(millis.to_string()))?;
        Ok(MockValue::Date(instant))
    }
}

/// Parse a timestamp string in various formats.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_dates_within_range() {
        let mocker = DateMocker::new("2020-01-01T00:00:00Z", "2024-12-31T23:59:59Z").unwrap();
        let mut config = MockConfig::new().with_seed(42);

        for _ in 0..1000 {
            match mocker.mock(&mut config).unwrap() {
                MockValue::Date(dt) => {
                    assert!(dt >= mocker.start() && dt <= mocker.end());
                    assert!(dt.year() >= 2020 && dt.year() <= 2024);
                }
                other => panic!("Expected date, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_date_only_patterns() {
        let mocker = DateMocker::new("2020-01-01", "2020-01-01").unwrap();
        let mut config = MockConfig::new();
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(mocker.mock(&mut config).unwrap(), MockValue::Date(expected));
    }

    #[test]
    fn test_default_config_range() {
        let mocker = DateMocker::from_config(&MockConfig::new()).unwrap();
        assert_eq!(mocker.start().year(), 1970);
        assert_eq!(mocker.end().year(), 2100);
    }

    #[test]
    fn test_bad_bounds_fail_at_construction() {
        assert!(matches!(
            DateMocker::new("yesterday", "2020-01-01"),
            Err(MockError::InvalidDate(ref s)) if s == "yesterday"
        ));
        assert!(matches!(
            DateMocker::new("2024-01-01", "2020-01-01"),
            Err(MockError::InvalidRange { kind: "date", .. })
        ));

        let config = MockConfig::new().with_date_range("2020-13-01", "2021-01-01");
        assert!(DateMocker::from_config(&config).is_err());
    }

    #[test]
    fn test_offset_timestamps_are_normalized() {
        let mocker = DateMocker::new("2020-01-01T02:00:00+02:00", "2020-01-01T00:00:00Z").unwrap();
        assert_eq!(mocker.start(), mocker.end());
    }
}
