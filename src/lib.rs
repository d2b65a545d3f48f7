//! Headless engine for scrollable date and time wheel pickers.
//!
//! The crate owns the math and state of a picker: label sequence
//! generation, scroll-offset/index/value conversion, selection limits,
//! date/time bounds and the cross-column constraint propagation of the
//! [`DatePicker`] and [`DateTimePicker`] coordinators. Rendering, gestures
//! and animation stay in the host UI, connected through the
//! [`ScrollTarget`] trait and the coordinator callbacks.

mod bounds;
mod column;
mod consts;
mod limit;
mod picker;
mod prelude;
mod scroll;
mod sequence;
mod types;

pub use bounds::{
    DateTimeBounds, TimeWindow, YearBounds, constrain_date, resolve_date, resolve_time,
};
pub use column::{ScrollTarget, WheelColumn};
pub use consts::*;
pub use limit::{AdjustedLimit, Limit};
pub use picker::{
    ChangeHandler, DateField, DateLabelFormatter, DatePicker, DateTimeField, DateTimePicker,
    FeedbackHandler, PickerOptions, PickerValue,
};
pub use scroll::{ColumnSpec, ResolvedColumn};
pub use sequence::{
    generate_12_hour_labels, generate_labels, gradient_fade_fraction, repeat_and_pad,
};
pub use types::{DateInput, PartialDate, PlainDate, PlainDateTime, days_in_month, is_leap_year};

/// Error type for parsing dates and date-times from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input does not match the expected shape.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    /// A component is not a number.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Empty input string.
    #[error("Empty date string")]
    EmptyInput,
}
