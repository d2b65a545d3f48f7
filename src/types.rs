use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    JANUARY, LEAP_YEAR_CYCLE, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MIN_DAY, MINUTES_PER_DAY,
    MINUTES_PER_HOUR, SECONDS_PER_DAY, SECONDS_PER_HOUR, TIME_SEPARATOR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A calendar date that is always internally consistent: the month is in
/// `1..=12` and the day never exceeds the length of its month. Constructors
/// clamp rather than fail, so a `PlainDate` can be built from any input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct PlainDate {
    year: i64,
    month: i64,
    day: i64,
}

impl PlainDate {
    /// Builds a date, clamping the month into `1..=12` and the day into the
    /// clamped month's length.
    pub fn new(year: i64, month: i64, day: i64) -> Self {
        let month = month.clamp(JANUARY, MAX_MONTH);
        let day = day.clamp(MIN_DAY, days_in_month(year, month));
        Self { year, month, day }
    }

    #[inline]
    pub const fn year(self) -> i64 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> i64 {
        self.month
    }

    #[inline]
    pub const fn day(self) -> i64 {
        self.day
    }

    /// Number of days in this date's month
    pub const fn last_day_of_month(self) -> i64 {
        days_in_month(self.year, self.month)
    }

    /// Days since 1970-01-01 (negative before the epoch)
    pub const fn to_days(self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// Inverse of [`PlainDate::to_days`]
    pub const fn from_days(days: i64) -> Self {
        let (year, month, day) = civil_from_days(days);
        Self { year, month, day }
    }

    /// The date `days` later (earlier when negative)
    pub const fn plus_days(self, days: i64) -> Self {
        Self::from_days(self.to_days() + days)
    }
}

impl FromStr for PlainDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // YYYY-MM-DD; out-of-range components clamp like every other entry
        // point into PlainDate
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(trimmed.to_owned()));
        }

        let year = parse_i64(parts[0])?;
        let month = parse_i64(parts[1])?;
        let day = parse_i64(parts[2])?;
        Ok(Self::new(year, month, day))
    }
}

impl serde::Serialize for PlainDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for PlainDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A wall-clock instant with minute precision. The hour and minute are
/// clamped into `0..=23` and `0..=59` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{} {:02}:{:02}", date, hour, minute)]
pub struct PlainDateTime {
    date: PlainDate,
    hour: i64,
    minute: i64,
}

impl PlainDateTime {
    pub fn new(date: PlainDate, hour: i64, minute: i64) -> Self {
        Self {
            date,
            hour: hour.clamp(0, MAX_HOUR),
            minute: minute.clamp(0, MAX_MINUTE),
        }
    }

    pub fn from_parts(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> Self {
        Self::new(PlainDate::new(year, month, day), hour, minute)
    }

    /// The current UTC wall-clock time
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
            });
        let days = secs.div_euclid(SECONDS_PER_DAY);
        let rem = secs.rem_euclid(SECONDS_PER_DAY);
        Self {
            date: PlainDate::from_days(days),
            hour: rem / SECONDS_PER_HOUR,
            minute: rem % SECONDS_PER_HOUR / MINUTES_PER_HOUR,
        }
    }

    #[inline]
    pub const fn date(self) -> PlainDate {
        self.date
    }

    #[inline]
    pub const fn hour(self) -> i64 {
        self.hour
    }

    #[inline]
    pub const fn minute(self) -> i64 {
        self.minute
    }

    /// Minutes since 1970-01-01 00:00, a totally ordered scalar for
    /// comparing and clamping instants
    pub const fn total_minutes(self) -> i64 {
        self.date.to_days() * MINUTES_PER_DAY + self.hour * MINUTES_PER_HOUR + self.minute
    }
}

impl FromStr for PlainDateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // "YYYY-MM-DD HH:MM", accepting a 'T' separator as well
        let (date_part, time_part) = trimmed
            .split_once(' ')
            .or_else(|| trimmed.split_once('T'))
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;

        let date: PlainDate = date_part.parse()?;
        let (hour_part, minute_part) = time_part
            .trim()
            .split_once(TIME_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(time_part.to_owned()))?;

        let hour = parse_i64(hour_part)?;
        let minute = parse_i64(minute_part)?;
        Ok(Self::new(date, hour, minute))
    }
}

impl serde::Serialize for PlainDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for PlainDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A possibly incomplete date-time. Missing fields are filled from a
/// fallback (the current time, or the picker's current selection) before
/// any clamping happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialDate {
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub day: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
}

/// Either a complete instant or a handful of named fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, From, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Instant(PlainDateTime),
    Parts(PartialDate),
}

impl DateInput {
    /// Flattens either shape into the field-per-field form
    pub fn parts(self) -> PartialDate {
        match self {
            Self::Instant(instant) => PartialDate {
                year: Some(instant.date().year()),
                month: Some(instant.date().month()),
                day: Some(instant.date().day()),
                hour: Some(instant.hour()),
                minute: Some(instant.minute()),
            },
            Self::Parts(parts) => parts,
        }
    }
}

// Helper functions

pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i64, month: i64) -> i64 {
    debug_assert!(month >= 1 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

fn parse_i64(s: &str) -> Result<i64, ParseError> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidNumber(s.trim().to_owned()))
}

// Proleptic Gregorian <-> epoch-day conversion, using the standard
// era/year-of-era decomposition with March-based months.

const fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

const fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (if month <= 2 { y + 1 } else { y }, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_month_and_day() {
        let date = PlainDate::new(2024, 2, 31);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 29);

        let date = PlainDate::new(2023, 2, 31);
        assert_eq!(date.day(), 28);

        let date = PlainDate::new(2024, 13, 5);
        assert_eq!(date.month(), 12);

        let date = PlainDate::new(2024, 0, 0);
        assert_eq!((date.month(), date.day()), (1, 1));
    }

    #[test]
    fn test_epoch_day_round_trip() {
        struct TestCase {
            year: i64,
            month: i64,
            day: i64,
            days: i64,
        }

        let cases = [
            TestCase {
                year: 1970,
                month: 1,
                day: 1,
                days: 0,
            },
            TestCase {
                year: 1969,
                month: 12,
                day: 31,
                days: -1,
            },
            TestCase {
                year: 2000,
                month: 3,
                day: 1,
                days: 11_017,
            },
            TestCase {
                year: 2024,
                month: 2,
                day: 29,
                days: 19_782,
            },
        ];

        for case in &cases {
            let date = PlainDate::new(case.year, case.month, case.day);
            assert_eq!(
                date.to_days(),
                case.days,
                "{}-{}-{} has wrong epoch day",
                case.year,
                case.month,
                case.day
            );
            assert_eq!(PlainDate::from_days(case.days), date);
        }
    }

    #[test]
    fn test_round_trip_across_leap_boundaries() {
        for days in -1_000..1_000 {
            let date = PlainDate::from_days(days);
            assert_eq!(date.to_days(), days);
        }
    }

    #[test]
    fn test_plus_days() {
        let date = PlainDate::new(2024, 2, 28);
        assert_eq!(date.plus_days(1), PlainDate::new(2024, 2, 29));
        assert_eq!(date.plus_days(2), PlainDate::new(2024, 3, 1));
        assert_eq!(date.plus_days(-28), PlainDate::new(2024, 1, 31));
    }

    #[test]
    fn test_date_ordering() {
        let a = PlainDate::new(2024, 3, 10);
        let b = PlainDate::new(2024, 3, 11);
        let c = PlainDate::new(2025, 1, 1);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a, a);
    }

    #[test]
    fn test_date_display_and_parse() {
        let date = PlainDate::new(2024, 8, 5);
        assert_eq!(date.to_string(), "2024-08-05");
        assert_eq!("2024-08-05".parse::<PlainDate>().unwrap(), date);
        assert_eq!(" 2024-8-5 ".parse::<PlainDate>().unwrap(), date);
    }

    #[test]
    fn test_date_parse_errors() {
        assert!(matches!(
            "".parse::<PlainDate>(),
            Err(ParseError::EmptyInput)
        ));
        assert!(matches!(
            "2024-08".parse::<PlainDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-xx-01".parse::<PlainDate>(),
            Err(ParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_date_parse_clamps_components() {
        let date = "2024-02-31".parse::<PlainDate>().unwrap();
        assert_eq!(date, PlainDate::new(2024, 2, 29));
    }

    #[test]
    fn test_date_serde() {
        let date = PlainDate::new(2024, 8, 5);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-08-05\"");

        let parsed: PlainDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_date_time_clamps_time() {
        let instant = PlainDateTime::from_parts(2024, 6, 15, 27, 75);
        assert_eq!((instant.hour(), instant.minute()), (23, 59));

        let instant = PlainDateTime::from_parts(2024, 6, 15, -1, -1);
        assert_eq!((instant.hour(), instant.minute()), (0, 0));
    }

    #[test]
    fn test_date_time_display_and_parse() {
        let instant = PlainDateTime::from_parts(2024, 6, 15, 9, 5);
        assert_eq!(instant.to_string(), "2024-06-15 09:05");
        assert_eq!(
            "2024-06-15 09:05".parse::<PlainDateTime>().unwrap(),
            instant
        );
        assert_eq!(
            "2024-06-15T09:05".parse::<PlainDateTime>().unwrap(),
            instant
        );
    }

    #[test]
    fn test_date_time_parse_errors() {
        assert!(matches!(
            "2024-06-15".parse::<PlainDateTime>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-06-15 0905".parse::<PlainDateTime>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_total_minutes_ordering() {
        let earlier = PlainDateTime::from_parts(2024, 6, 15, 9, 30);
        let later = PlainDateTime::from_parts(2024, 6, 15, 9, 31);
        let next_day = PlainDateTime::from_parts(2024, 6, 16, 0, 0);
        assert!(earlier.total_minutes() < later.total_minutes());
        assert!(later.total_minutes() < next_day.total_minutes());
        assert_eq!(
            PlainDateTime::from_parts(1970, 1, 1, 0, 1).total_minutes(),
            1
        );
    }

    #[test]
    fn test_date_time_serde() {
        let instant = PlainDateTime::from_parts(2024, 6, 15, 9, 5);
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, "\"2024-06-15 09:05\"");

        let parsed: PlainDateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(instant, parsed);
    }

    #[test]
    fn test_date_input_parts() {
        let instant = PlainDateTime::from_parts(2024, 6, 15, 9, 5);
        let parts = DateInput::from(instant).parts();
        assert_eq!(parts.year, Some(2024));
        assert_eq!(parts.minute, Some(5));

        let partial = PartialDate {
            year: Some(1999),
            ..PartialDate::default()
        };
        assert_eq!(DateInput::from(partial).parts(), partial);
    }

    #[test]
    fn test_date_input_serde_shapes() {
        let from_string: DateInput = serde_json::from_str("\"2024-06-15 09:05\"").unwrap();
        assert_eq!(
            from_string,
            DateInput::Instant(PlainDateTime::from_parts(2024, 6, 15, 9, 5))
        );

        let from_map: DateInput = serde_json::from_str(r#"{"year": 2024, "month": 6}"#).unwrap();
        assert_eq!(
            from_map,
            DateInput::Parts(PartialDate {
                year: Some(2024),
                month: Some(6),
                ..PartialDate::default()
            })
        );
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i64,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
            TestCase {
                year: 2400,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_table() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[usize::try_from(month).unwrap()],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2000, 2), 29, "Century year divisible by 400");
    }
}
