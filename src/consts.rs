/// Maximum valid month (December)
pub const MAX_MONTH: i64 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: i64 = 1;

/// Month number for January
pub const JANUARY: i64 = 1;
/// Month number for February
pub const FEBRUARY: i64 = 2;
/// Month number for December
pub const DECEMBER: i64 = 12;

/// Last hour of the day
pub const MAX_HOUR: i64 = 23;
/// Last minute of the hour
pub const MAX_MINUTE: i64 = 59;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i64 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [i64; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';

/// Years either side of today covered by the default picker range
pub const DEFAULT_YEAR_SPAN: i64 = 50;

/// Row count the automatic repeat heuristic aims for. Enough rows that a
/// fling rarely reaches the end of the list, without rendering thousands
/// of rows for small sequences. A display tunable, not a contract.
pub const AUTO_REPEAT_TARGET: i64 = 180;

/// Upper bound on padding placeholders per side of a column
pub const MAX_PAD_ITEMS: i64 = 10;

/// Labels are padded to at least this many characters
pub(crate) const MIN_LABEL_WIDTH: usize = 2;

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;
pub(crate) const MINUTES_PER_HOUR: i64 = 60;
pub(crate) const MINUTES_PER_DAY: i64 = 1_440;
