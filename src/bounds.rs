use crate::consts::{
    DECEMBER, DEFAULT_YEAR_SPAN, JANUARY, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MIN_DAY,
};
use crate::types::{DateInput, PlainDate, PlainDateTime, days_in_month};
use serde::{Deserialize, Serialize};

/// Inclusive year range a date picker offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub minimum_year: i64,
    pub maximum_year: i64,
}

impl YearBounds {
    /// Builds the range, swapping the endpoints when they arrive inverted
    pub fn new(minimum_year: i64, maximum_year: i64) -> Self {
        if minimum_year > maximum_year {
            Self {
                minimum_year: maximum_year,
                maximum_year: minimum_year,
            }
        } else {
            Self {
                minimum_year,
                maximum_year,
            }
        }
    }

    /// The default span centered on a reference year
    pub const fn around(year: i64) -> Self {
        Self {
            minimum_year: year - DEFAULT_YEAR_SPAN,
            maximum_year: year + DEFAULT_YEAR_SPAN,
        }
    }

    pub const fn clamp_year(&self, year: i64) -> i64 {
        if year < self.minimum_year {
            self.minimum_year
        } else if year > self.maximum_year {
            self.maximum_year
        } else {
            year
        }
    }
}

/// Resolves a possibly missing, possibly partial initial value into a safe
/// calendar date. Each component falls back to `fallback` when absent, then
/// clamps in dependency order: year first, then month, then day against the
/// already-clamped year and month.
pub fn resolve_date(
    input: Option<&DateInput>,
    bounds: YearBounds,
    fallback: &PlainDateTime,
) -> PlainDate {
    let parts = input.map(|value| value.parts()).unwrap_or_default();
    let year = bounds.clamp_year(parts.year.unwrap_or_else(|| fallback.date().year()));
    let month = parts
        .month
        .unwrap_or_else(|| fallback.date().month())
        .clamp(JANUARY, MAX_MONTH);
    let day = parts
        .day
        .unwrap_or_else(|| fallback.date().day())
        .clamp(MIN_DAY, days_in_month(year, month));
    PlainDate::new(year, month, day)
}

/// Companion to [`resolve_date`] for the time-of-day fields. The result is
/// clock-valid but not yet checked against any date-dependent window.
pub fn resolve_time(input: Option<&DateInput>, fallback: &PlainDateTime) -> (i64, i64) {
    let parts = input.map(|value| value.parts()).unwrap_or_default();
    let hour = parts.hour.unwrap_or_else(|| fallback.hour()).clamp(0, MAX_HOUR);
    let minute = parts
        .minute
        .unwrap_or_else(|| fallback.minute())
        .clamp(0, MAX_MINUTE);
    (hour, minute)
}

/// Clamps a complete year/month/day triple with the same ordered rules as
/// [`resolve_date`]
pub fn constrain_date(year: i64, month: i64, day: i64, bounds: YearBounds) -> PlainDate {
    let year = bounds.clamp_year(year);
    let month = month.clamp(JANUARY, MAX_MONTH);
    PlainDate::new(year, month, day)
}

/// Hour and minute extremes that apply to one calendar date. Away from the
/// range endpoints this is the whole day; on a boundary date it narrows to
/// the boundary's time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub min_hour: i64,
    pub min_minute: i64,
    pub max_hour: i64,
    pub max_minute: i64,
}

impl TimeWindow {
    /// Clamps a time of day into the window. The hour moves first; the
    /// minute is only constrained when the hour lands on a boundary hour.
    pub fn clamp(&self, hour: i64, minute: i64) -> (i64, i64) {
        let mut hour = hour.clamp(0, MAX_HOUR);
        let mut minute = minute.clamp(0, MAX_MINUTE);

        if hour < self.min_hour {
            hour = self.min_hour;
            minute = minute.max(self.min_minute);
        } else if hour > self.max_hour {
            hour = self.max_hour;
            minute = minute.min(self.max_minute);
        }

        if hour == self.min_hour && minute < self.min_minute {
            minute = self.min_minute;
        }
        if hour == self.max_hour && minute > self.max_minute {
            minute = self.max_minute;
        }

        (hour, minute)
    }

    /// The minute range available at a given selected hour: the full hour in
    /// the middle of the window, narrowed on boundary hours, never inverted
    pub fn minute_limit_for_hour(&self, hour: i64) -> (i64, i64) {
        let mut min = 0;
        let mut max = MAX_MINUTE;

        if hour == self.min_hour {
            min = self.min_minute;
        }
        if hour == self.max_hour {
            max = self.max_minute;
        }
        if self.min_hour == self.max_hour {
            min = min.max(self.min_minute);
            max = max.min(self.max_minute);
        }

        if min > max {
            min = max;
        }
        (min, max)
    }
}

/// Normalized minimum and maximum instants for a date-time picker, plus the
/// derived per-date windows and date-index mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeBounds {
    min: PlainDateTime,
    max: PlainDateTime,
}

impl DateTimeBounds {
    /// Builds the bounds from optional endpoints, defaulting to the
    /// standard span either side of the current time
    pub fn new(min: Option<PlainDateTime>, max: Option<PlainDateTime>) -> Self {
        Self::with_fallback(min, max, &PlainDateTime::now())
    }

    /// As [`DateTimeBounds::new`] with an explicit reference time. Missing
    /// endpoints default to the first and last minute of the years
    /// `DEFAULT_YEAR_SPAN` before and after the reference; inverted
    /// endpoints are swapped.
    pub fn with_fallback(
        min: Option<PlainDateTime>,
        max: Option<PlainDateTime>,
        now: &PlainDateTime,
    ) -> Self {
        let years = YearBounds::around(now.date().year());
        let min = min.unwrap_or_else(|| {
            PlainDateTime::from_parts(years.minimum_year, JANUARY, MIN_DAY, 0, 0)
        });
        let max = max.unwrap_or_else(|| {
            PlainDateTime::from_parts(
                years.maximum_year,
                DECEMBER,
                days_in_month(years.maximum_year, DECEMBER),
                MAX_HOUR,
                MAX_MINUTE,
            )
        });

        if min.total_minutes() > max.total_minutes() {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    #[inline]
    pub const fn min(&self) -> PlainDateTime {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> PlainDateTime {
        self.max
    }

    pub const fn min_date(&self) -> PlainDate {
        self.min.date()
    }

    pub const fn max_date(&self) -> PlainDate {
        self.max.date()
    }

    pub const fn year_bounds(&self) -> YearBounds {
        YearBounds {
            minimum_year: self.min.date().year(),
            maximum_year: self.max.date().year(),
        }
    }

    /// Clamps a date into the range, ignoring time of day
    pub fn clamp_date(&self, date: PlainDate) -> PlainDate {
        date.clamp(self.min_date(), self.max_date())
    }

    /// The hour/minute window that applies on `date`. An inverted window
    /// (possible when both endpoints share the date) collapses toward the
    /// maximum.
    pub fn time_window_for(&self, date: PlainDate) -> TimeWindow {
        let mut window = TimeWindow {
            min_hour: 0,
            min_minute: 0,
            max_hour: MAX_HOUR,
            max_minute: MAX_MINUTE,
        };

        if date == self.min_date() {
            window.min_hour = self.min.hour();
            window.min_minute = self.min.minute();
        }
        if date == self.max_date() {
            window.max_hour = self.max.hour();
            window.max_minute = self.max.minute();
        }

        if window.min_hour > window.max_hour {
            window.min_hour = window.max_hour;
            window.min_minute = 0;
        }
        if window.min_hour == window.max_hour && window.min_minute > window.max_minute {
            window.min_minute = window.max_minute;
        }

        window
    }

    /// Clamps a time of day against the window for `date`
    pub fn clamp_time(&self, date: PlainDate, hour: i64, minute: i64) -> (i64, i64) {
        self.time_window_for(date).clamp(hour, minute)
    }

    /// Number of selectable dates, endpoints included
    pub fn total_days(&self) -> i64 {
        (self.max_date().to_days() - self.min_date().to_days() + 1).max(1)
    }

    /// The date at a position in the range; out-of-range positions clamp to
    /// the endpoints
    pub fn date_at(&self, index: i64) -> PlainDate {
        self.min_date()
            .plus_days(index.clamp(0, self.total_days() - 1))
    }

    /// Inverse of [`DateTimeBounds::date_at`]
    pub fn index_of(&self, date: PlainDate) -> i64 {
        (date.to_days() - self.min_date().to_days()).clamp(0, self.total_days() - 1)
    }

    /// Month range available in `year`: narrowed on the boundary years
    pub fn month_limits(&self, year: i64) -> (i64, i64) {
        let mut min = JANUARY;
        let mut max = MAX_MONTH;
        if year == self.min.date().year() {
            min = self.min.date().month();
        }
        if year == self.max.date().year() {
            max = self.max.date().month();
        }
        (min, max)
    }

    /// Day range available in `(year, month)`: the month's length, narrowed
    /// on the boundary months
    pub fn day_limits(&self, year: i64, month: i64) -> (i64, i64) {
        let mut min = MIN_DAY;
        let mut max = days_in_month(year, month);

        let lower = self.min.date();
        if year == lower.year() && month == lower.month() {
            min = lower.day();
        }

        let upper = self.max.date();
        if year == upper.year() && month == upper.month() {
            max = max.min(upper.day());
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartialDate;

    fn fallback() -> PlainDateTime {
        PlainDateTime::from_parts(2024, 6, 15, 10, 30)
    }

    fn bounds() -> DateTimeBounds {
        DateTimeBounds::with_fallback(
            Some(PlainDateTime::from_parts(2020, 3, 10, 9, 0)),
            Some(PlainDateTime::from_parts(2026, 9, 5, 17, 0)),
            &fallback(),
        )
    }

    #[test]
    fn test_resolve_date_clamps_in_order() {
        let years = YearBounds::new(1950, 2050);
        let input = DateInput::Parts(PartialDate {
            year: Some(1800),
            month: Some(2),
            day: Some(31),
            ..PartialDate::default()
        });

        let resolved = resolve_date(Some(&input), years, &fallback());
        // year clamps to the floor first; 1950 is not a leap year, so the
        // day clamp sees 28
        assert_eq!(resolved, PlainDate::new(1950, 2, 28));
    }

    #[test]
    fn test_resolve_date_fills_missing_fields_from_fallback() {
        let years = YearBounds::new(1950, 2050);
        let input = DateInput::Parts(PartialDate {
            day: Some(3),
            ..PartialDate::default()
        });
        let resolved = resolve_date(Some(&input), years, &fallback());
        assert_eq!(resolved, PlainDate::new(2024, 6, 3));

        let resolved = resolve_date(None, years, &fallback());
        assert_eq!(resolved, PlainDate::new(2024, 6, 15));
    }

    #[test]
    fn test_resolve_date_leap_day() {
        let years = YearBounds::new(1950, 2050);
        let input = DateInput::Parts(PartialDate {
            year: Some(2024),
            month: Some(2),
            day: Some(31),
            ..PartialDate::default()
        });
        let resolved = resolve_date(Some(&input), years, &fallback());
        assert_eq!(resolved, PlainDate::new(2024, 2, 29));
    }

    #[test]
    fn test_resolve_time() {
        let input = DateInput::Parts(PartialDate {
            hour: Some(99),
            ..PartialDate::default()
        });
        assert_eq!(resolve_time(Some(&input), &fallback()), (23, 30));
        assert_eq!(resolve_time(None, &fallback()), (10, 30));
    }

    #[test]
    fn test_constrain_date() {
        let years = YearBounds::new(2000, 2030);
        assert_eq!(
            constrain_date(2050, 13, 40, years),
            PlainDate::new(2030, 12, 31)
        );
        assert_eq!(
            constrain_date(2024, 2, 31, years),
            PlainDate::new(2024, 2, 29)
        );
    }

    #[test]
    fn test_year_bounds_swap_when_inverted() {
        let years = YearBounds::new(2050, 1950);
        assert_eq!(years.minimum_year, 1950);
        assert_eq!(years.maximum_year, 2050);
    }

    #[test]
    fn test_bounds_swap_when_inverted() {
        let swapped = DateTimeBounds::with_fallback(
            Some(PlainDateTime::from_parts(2026, 9, 5, 17, 0)),
            Some(PlainDateTime::from_parts(2020, 3, 10, 9, 0)),
            &fallback(),
        );
        assert_eq!(swapped, bounds());
    }

    #[test]
    fn test_bounds_defaults_span_the_reference_year() {
        let defaulted = DateTimeBounds::with_fallback(None, None, &fallback());
        assert_eq!(defaulted.min(), PlainDateTime::from_parts(1974, 1, 1, 0, 0));
        assert_eq!(
            defaulted.max(),
            PlainDateTime::from_parts(2074, 12, 31, 23, 59)
        );
    }

    #[test]
    fn test_time_window_mid_range_is_whole_day() {
        let window = bounds().time_window_for(PlainDate::new(2023, 5, 1));
        assert_eq!(
            window,
            TimeWindow {
                min_hour: 0,
                min_minute: 0,
                max_hour: 23,
                max_minute: 59,
            }
        );
    }

    #[test]
    fn test_time_window_on_boundary_dates() {
        let window = bounds().time_window_for(PlainDate::new(2020, 3, 10));
        assert_eq!((window.min_hour, window.min_minute), (9, 0));
        assert_eq!((window.max_hour, window.max_minute), (23, 59));

        let window = bounds().time_window_for(PlainDate::new(2026, 9, 5));
        assert_eq!((window.min_hour, window.min_minute), (0, 0));
        assert_eq!((window.max_hour, window.max_minute), (17, 0));
    }

    #[test]
    fn test_time_window_single_day_range() {
        let single = DateTimeBounds::with_fallback(
            Some(PlainDateTime::from_parts(2024, 6, 15, 9, 15)),
            Some(PlainDateTime::from_parts(2024, 6, 15, 17, 45)),
            &fallback(),
        );
        let window = single.time_window_for(PlainDate::new(2024, 6, 15));
        assert_eq!(
            window,
            TimeWindow {
                min_hour: 9,
                min_minute: 15,
                max_hour: 17,
                max_minute: 45,
            }
        );
    }

    #[test]
    fn test_time_window_collapse_when_inverted() {
        // both endpoints on the same date within one hour
        let tight = DateTimeBounds::with_fallback(
            Some(PlainDateTime::from_parts(2024, 6, 15, 12, 50)),
            Some(PlainDateTime::from_parts(2024, 6, 15, 12, 10)),
            &fallback(),
        );
        // instants swap, so the window is 12:10..=12:50
        let window = tight.time_window_for(PlainDate::new(2024, 6, 15));
        assert_eq!((window.min_hour, window.min_minute), (12, 10));
        assert_eq!((window.max_hour, window.max_minute), (12, 50));
    }

    #[test]
    fn test_clamp_time() {
        let range = bounds();
        let boundary = PlainDate::new(2020, 3, 10);

        // below the window: hour rises, minute keeps at least the minimum
        assert_eq!(range.clamp_time(boundary, 7, 30), (9, 30));
        // inside the window: untouched
        assert_eq!(range.clamp_time(boundary, 12, 5), (12, 5));
        // invalid clock values clamp first
        assert_eq!(range.clamp_time(boundary, -3, 75), (9, 59));

        let upper = PlainDate::new(2026, 9, 5);
        // above the window: hour falls, minute capped at the boundary minute
        assert_eq!(range.clamp_time(upper, 19, 45), (17, 0));
        assert_eq!(range.clamp_time(upper, 17, 45), (17, 0));
        assert_eq!(range.clamp_time(upper, 16, 45), (16, 45));
    }

    #[test]
    fn test_minute_limit_for_hour() {
        let window = TimeWindow {
            min_hour: 9,
            min_minute: 15,
            max_hour: 17,
            max_minute: 40,
        };
        assert_eq!(window.minute_limit_for_hour(12), (0, 59));
        assert_eq!(window.minute_limit_for_hour(9), (15, 59));
        assert_eq!(window.minute_limit_for_hour(17), (0, 40));

        let single_hour = TimeWindow {
            min_hour: 9,
            min_minute: 15,
            max_hour: 9,
            max_minute: 40,
        };
        assert_eq!(single_hour.minute_limit_for_hour(9), (15, 40));
    }

    #[test]
    fn test_date_index_mapping() {
        let range = bounds();
        let total = range.total_days();
        assert_eq!(
            total,
            PlainDate::new(2026, 9, 5).to_days() - PlainDate::new(2020, 3, 10).to_days() + 1
        );

        assert_eq!(range.date_at(0), PlainDate::new(2020, 3, 10));
        assert_eq!(range.date_at(1), PlainDate::new(2020, 3, 11));
        assert_eq!(range.date_at(total - 1), PlainDate::new(2026, 9, 5));
        // out-of-range indexes clamp to the endpoints
        assert_eq!(range.date_at(-5), PlainDate::new(2020, 3, 10));
        assert_eq!(range.date_at(total + 10), PlainDate::new(2026, 9, 5));

        assert_eq!(range.index_of(PlainDate::new(2020, 3, 10)), 0);
        assert_eq!(range.index_of(PlainDate::new(2026, 9, 5)), total - 1);
        assert_eq!(range.index_of(PlainDate::new(2010, 1, 1)), 0);

        for index in [0, 50, total - 1] {
            assert_eq!(range.index_of(range.date_at(index)), index);
        }
    }

    #[test]
    fn test_clamp_date() {
        let range = bounds();
        assert_eq!(
            range.clamp_date(PlainDate::new(2019, 1, 1)),
            PlainDate::new(2020, 3, 10)
        );
        assert_eq!(
            range.clamp_date(PlainDate::new(2023, 5, 5)),
            PlainDate::new(2023, 5, 5)
        );
        assert_eq!(
            range.clamp_date(PlainDate::new(2030, 1, 1)),
            PlainDate::new(2026, 9, 5)
        );
    }

    #[test]
    fn test_month_limits() {
        let range = bounds();
        assert_eq!(range.month_limits(2020), (3, 12));
        assert_eq!(range.month_limits(2026), (1, 9));
        assert_eq!(range.month_limits(2023), (1, 12));
    }

    #[test]
    fn test_day_limits() {
        let range = bounds();
        assert_eq!(range.day_limits(2020, 3), (10, 31));
        assert_eq!(range.day_limits(2026, 9), (1, 5));
        assert_eq!(range.day_limits(2023, 2), (1, 28));
        assert_eq!(range.day_limits(2024, 2), (1, 29));
    }
}
