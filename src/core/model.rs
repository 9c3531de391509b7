use crate::core::ids::{FollowId, PersonId};
use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde::{Serialize, Serializer};

pub const PERSON_COLUMNS: [&str; 4] = ["id", "name", "spam_score", "last_seen"];
pub const FOLLOW_COLUMNS: [&str; 5] = ["id", "src_id", "dst_id", "quality", "last_seen"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub spam_score: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Follow {
    pub id: FollowId,
    pub src_id: PersonId,
    pub dst_id: PersonId,
    pub quality: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub persons: Vec<Person>,
    pub follows: Vec<Follow>,
}

pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// ISO-8601 with an explicit `+00:00` offset. The fractional part is omitted
/// when it is zero and printed with microsecond precision otherwise.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    let precision = if ts.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    ts.to_rfc3339_opts(precision, false)
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeDelta, TimeZone};

    #[test]
    fn test_round4() {
        assert_relative_eq!(0.1235, round4(0.123456));
        assert_relative_eq!(0.4, round4(0.40001));
        assert_relative_eq!(1.0, round4(0.99999));
        assert_relative_eq!(0.0, round4(0.00001));
    }

    #[test]
    fn test_format_whole_seconds() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 0).unwrap();
        assert_eq!("2024-03-09T08:05:00+00:00", format_timestamp(&ts));
    }

    #[test]
    fn test_format_microseconds() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 8, 5, 0).unwrap() + TimeDelta::microseconds(1_500);
        assert_eq!("2024-03-09T08:05:00.001500+00:00", format_timestamp(&ts));
    }

    #[test]
    fn test_parse_accepts_formatted_output() {
        let ts = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap() + TimeDelta::microseconds(42);
        assert_eq!(Some(ts), parse_timestamp(&format_timestamp(&ts)));
        assert_eq!(Some(ts), parse_timestamp(" 2023-12-31T23:59:59.000042Z "));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(None, parse_timestamp("yesterday"));
        assert_eq!(None, parse_timestamp(""));
    }
}
