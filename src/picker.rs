use crate::bounds::{DateTimeBounds, resolve_date, resolve_time};
use crate::column::{ScrollTarget, WheelColumn};
use crate::limit::Limit;
use crate::prelude::*;
use crate::scroll::ColumnSpec;
use crate::types::{DateInput, PartialDate, PlainDate, PlainDateTime};
use serde::Serialize;
use tracing::debug;

/// Columns of a [`DatePicker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DateField {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

/// Columns of a [`DateTimePicker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DateTimeField {
    #[display(fmt = "date")]
    Date,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
}

/// The composite selection a picker reports: the individual column values
/// plus the combined instant. Equality gates change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PickerValue {
    pub day: i64,
    pub month: i64,
    pub year: i64,
    pub hour: i64,
    pub minute: i64,
    pub date: PlainDateTime,
}

pub type ChangeHandler = Box<dyn FnMut(&PickerValue)>;
pub type FeedbackHandler = Box<dyn FnMut()>;
pub type DateLabelFormatter = Box<dyn Fn(PlainDate) -> String>;

/// Configuration shared by both picker variants
pub struct PickerOptions {
    pub minimum_date: Option<PlainDateTime>,
    pub maximum_date: Option<PlainDateTime>,
    pub initial_value: Option<DateInput>,
    /// Visual order of the date-mode columns, also used for the
    /// accessibility value string
    pub column_order: [DateField; 3],
    /// Visual order of the datetime-mode columns
    pub date_time_order: [DateTimeField; 3],
    pub disable_infinite_scroll: bool,
    pub pad_with_n_items: i64,
    pub repeat: Option<i64>,
    pub pad_days_with_zero: bool,
    pub pad_months_with_zero: bool,
    pub pad_hours_with_zero: bool,
    pub pad_minutes_with_zero: bool,
    /// Overrides the `YYYY-MM-DD` labels of the datetime-mode date column
    pub format_date_label: Option<DateLabelFormatter>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            minimum_date: None,
            maximum_date: None,
            initial_value: None,
            column_order: [DateField::Day, DateField::Month, DateField::Year],
            date_time_order: [
                DateTimeField::Date,
                DateTimeField::Hour,
                DateTimeField::Minute,
            ],
            disable_infinite_scroll: false,
            pad_with_n_items: 2,
            repeat: None,
            pad_days_with_zero: true,
            pad_months_with_zero: true,
            pad_hours_with_zero: true,
            pad_minutes_with_zero: true,
            format_date_label: None,
        }
    }
}

impl PickerOptions {
    fn column_spec(&self, start_from: i64, maximum_value: i64, pad_zero: bool) -> ColumnSpec {
        ColumnSpec {
            interval: 1,
            start_from,
            maximum_value,
            pad_with_n_items: self.pad_with_n_items,
            repeat: self.repeat,
            disable_infinite_scroll: self.disable_infinite_scroll,
            pad_numbers_with_zero: pad_zero,
        }
    }
}

fn format_component(value: i64, pad_with_zero: bool) -> String {
    if pad_with_zero {
        format!("{value:02}")
    } else {
        value.to_string()
    }
}

/// Coordinator for the day/month/year wheel triple.
///
/// Every mutation runs one synchronous pass in dependency order: the
/// settled column first, then the month range for the selected year, then
/// the day range for the selected year and month. Dependent columns are
/// rebuilt when their range shifts, and a change is only reported when the
/// composite value actually differs from the last one reported.
pub struct DatePicker {
    bounds: DateTimeBounds,
    options: PickerOptions,
    day: WheelColumn,
    month: WheelColumn,
    year: WheelColumn,
    selected: PlainDate,
    hour: i64,
    minute: i64,
    initial_date: PlainDate,
    initial_hour: i64,
    initial_minute: i64,
    last_value: PickerValue,
    on_change: Option<ChangeHandler>,
    on_feedback: Option<FeedbackHandler>,
}

impl DatePicker {
    pub fn new(options: PickerOptions) -> Self {
        Self::with_fallback(options, &PlainDateTime::now())
    }

    /// As [`DatePicker::new`] with an explicit current time for defaults
    pub fn with_fallback(options: PickerOptions, now: &PlainDateTime) -> Self {
        let bounds =
            DateTimeBounds::with_fallback(options.minimum_date, options.maximum_date, now);

        let date = resolve_date(options.initial_value.as_ref(), bounds.year_bounds(), now);
        let date = bounds.clamp_date(date);
        let (hour, minute) = resolve_time(options.initial_value.as_ref(), now);
        let (hour, minute) = bounds.clamp_time(date, hour, minute);

        let years = bounds.year_bounds();
        let (month_min, month_max) = bounds.month_limits(date.year());
        let (day_min, day_max) = bounds.day_limits(date.year(), date.month());

        let year = WheelColumn::new(
            options.column_spec(years.minimum_year, years.maximum_year, false),
            date.year(),
            Limit::new(years.minimum_year, years.maximum_year),
        );
        let month = WheelColumn::new(
            options.column_spec(month_min, month_max, options.pad_months_with_zero),
            date.month(),
            Limit::new(month_min, month_max),
        );
        let day = WheelColumn::new(
            options.column_spec(day_min, day_max, options.pad_days_with_zero),
            date.day(),
            Limit::new(day_min, day_max),
        );

        let instant = PlainDateTime::new(date, hour, minute);
        let last_value = PickerValue {
            day: date.day(),
            month: date.month(),
            year: date.year(),
            hour,
            minute,
            date: instant,
        };

        Self {
            bounds,
            options,
            day,
            month,
            year,
            selected: date,
            hour,
            minute,
            initial_date: date,
            initial_hour: hour,
            initial_minute: minute,
            last_value,
            on_change: None,
            on_feedback: None,
        }
    }

    pub fn on_change(&mut self, handler: ChangeHandler) {
        self.on_change = Some(handler);
    }

    pub fn on_feedback(&mut self, handler: FeedbackHandler) {
        self.on_feedback = Some(handler);
    }

    pub fn attach_scroll_target(&mut self, field: DateField, target: Box<dyn ScrollTarget>) {
        self.column_mut(field).attach_scroll_target(target);
    }

    pub fn column(&self, field: DateField) -> &WheelColumn {
        match field {
            DateField::Day => &self.day,
            DateField::Month => &self.month,
            DateField::Year => &self.year,
        }
    }

    fn column_mut(&mut self, field: DateField) -> &mut WheelColumn {
        match field {
            DateField::Day => &mut self.day,
            DateField::Month => &mut self.month,
            DateField::Year => &mut self.year,
        }
    }

    pub const fn column_order(&self) -> [DateField; 3] {
        self.options.column_order
    }

    pub const fn bounds(&self) -> &DateTimeBounds {
        &self.bounds
    }

    /// Latest reported composite selection
    pub const fn value(&self) -> PickerValue {
        self.last_value
    }

    /// A momentum scroll on one column came to rest
    pub fn settled(&mut self, field: DateField, y_offset: f64, item_height: f64) {
        let value = self.column_mut(field).settle(y_offset, item_height);
        debug!(column = %field, value, "column settled");

        self.selected = match field {
            DateField::Day => {
                PlainDate::new(self.selected.year(), self.selected.month(), value)
            }
            DateField::Month => PlainDate::new(self.selected.year(), value, self.selected.day()),
            DateField::Year => {
                PlainDate::new(value, self.selected.month(), self.selected.day())
            }
        };

        self.sync_dependents();
        self.emit();
        self.feedback();
    }

    /// Viewport tick from one column's host list
    pub fn visible_index_changed(&mut self, field: DateField, index: usize) {
        self.column_mut(field).visible_index_changed(index);
    }

    /// Applies an explicit selection. Missing fields keep their current
    /// values; everything is clamped before any column moves.
    pub fn set_value(&mut self, input: DateInput, animated: bool) {
        let parts = input.parts();
        let merged = DateInput::Parts(PartialDate {
            year: parts.year.or(Some(self.selected.year())),
            month: parts.month.or(Some(self.selected.month())),
            day: parts.day.or(Some(self.selected.day())),
            hour: parts.hour.or(Some(self.hour)),
            minute: parts.minute.or(Some(self.minute)),
        });
        let current = PlainDateTime::new(self.selected, self.hour, self.minute);

        let date = resolve_date(Some(&merged), self.bounds.year_bounds(), &current);
        let date = self.bounds.clamp_date(date);
        let (hour, minute) = resolve_time(Some(&merged), &current);
        let (hour, minute) = self.bounds.clamp_time(date, hour, minute);

        self.selected = date;
        self.hour = hour;
        self.minute = minute;
        self.sync_dependents();

        self.year.set_value(self.selected.year(), animated);
        self.month.set_value(self.selected.month(), animated);
        self.day.set_value(self.selected.day(), animated);
        self.emit();
    }

    /// Returns to the initially resolved selection
    pub fn reset(&mut self, animated: bool) {
        self.selected = self.initial_date;
        self.hour = self.initial_hour;
        self.minute = self.initial_minute;
        self.sync_dependents();

        self.year.set_value(self.selected.year(), animated);
        self.month.set_value(self.selected.month(), animated);
        self.day.set_value(self.selected.day(), animated);
        self.emit();
    }

    /// Accessibility step on one column
    pub fn increment(&mut self, field: DateField) {
        self.step(field, 1);
    }

    pub fn decrement(&mut self, field: DateField) {
        self.step(field, -1);
    }

    fn step(&mut self, field: DateField, delta: i64) {
        let parts = match field {
            DateField::Day => PartialDate {
                day: Some(self.selected.day() + delta),
                ..PartialDate::default()
            },
            DateField::Month => PartialDate {
                month: Some(self.selected.month() + delta),
                ..PartialDate::default()
            },
            DateField::Year => PartialDate {
                year: Some(self.selected.year() + delta),
                ..PartialDate::default()
            },
        };
        self.set_value(DateInput::Parts(parts), true);
    }

    /// The selection as a screen-reader string, ordered like the columns
    pub fn accessibility_text(&self) -> String {
        self.options
            .column_order
            .iter()
            .map(|field| match field {
                DateField::Day => {
                    format_component(self.selected.day(), self.options.pad_days_with_zero)
                }
                DateField::Month => {
                    format_component(self.selected.month(), self.options.pad_months_with_zero)
                }
                DateField::Year => self.selected.year().to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Re-derives the month and day ranges for the current selection and
    /// rebuilds the dependent columns whose range shifted
    fn sync_dependents(&mut self) {
        let (month_min, month_max) = self.bounds.month_limits(self.selected.year());
        let month = self.selected.month().clamp(month_min, month_max);

        let (day_min, day_max) = self.bounds.day_limits(self.selected.year(), month);
        let day = self.selected.day().clamp(day_min, day_max);

        self.selected = PlainDate::new(self.selected.year(), month, day);

        let month_range = (
            self.month.resolved().start_from,
            self.month.resolved().absolute_maximum(),
        );
        if month_range != (month_min, month_max) {
            self.month.reconfigure(
                self.options
                    .column_spec(month_min, month_max, self.options.pad_months_with_zero),
                Limit::new(month_min, month_max),
                true,
            );
        }

        let day_range = (
            self.day.resolved().start_from,
            self.day.resolved().absolute_maximum(),
        );
        if day_range != (day_min, day_max) {
            self.day.reconfigure(
                self.options
                    .column_spec(day_min, day_max, self.options.pad_days_with_zero),
                Limit::new(day_min, day_max),
                true,
            );
        }
    }

    // The carried time is clamped to the date's window here, so a settle
    // onto a boundary date never reports an out-of-bounds instant.
    fn compose(&self) -> PickerValue {
        let date = self.bounds.clamp_date(self.selected);
        let (hour, minute) = self.bounds.clamp_time(date, self.hour, self.minute);
        let instant = PlainDateTime::new(date, hour, minute);
        PickerValue {
            day: date.day(),
            month: date.month(),
            year: date.year(),
            hour,
            minute,
            date: instant,
        }
    }

    fn emit(&mut self) {
        let next = self.compose();
        if next == self.last_value {
            return;
        }
        self.last_value = next;
        if let Some(handler) = self.on_change.as_mut() {
            handler(&next);
        }
    }

    fn feedback(&mut self) {
        if let Some(handler) = self.on_feedback.as_mut() {
            handler();
        }
    }
}

/// Coordinator for the date/hour/minute wheel triple.
///
/// The date column selects a whole calendar day by its position in the
/// bounded range; the hour and minute columns are constrained by the time
/// window of the selected date. Recomputation runs date first, then hour,
/// then minute, within one synchronous pass.
pub struct DateTimePicker {
    bounds: DateTimeBounds,
    options: PickerOptions,
    date: WheelColumn,
    hour: WheelColumn,
    minute: WheelColumn,
    selected_index: i64,
    selected_hour: i64,
    selected_minute: i64,
    initial_index: i64,
    initial_hour: i64,
    initial_minute: i64,
    last_value: PickerValue,
    on_change: Option<ChangeHandler>,
    on_feedback: Option<FeedbackHandler>,
}

impl DateTimePicker {
    pub fn new(options: PickerOptions) -> Self {
        Self::with_fallback(options, &PlainDateTime::now())
    }

    /// As [`DateTimePicker::new`] with an explicit current time for
    /// defaults
    pub fn with_fallback(options: PickerOptions, now: &PlainDateTime) -> Self {
        let bounds =
            DateTimeBounds::with_fallback(options.minimum_date, options.maximum_date, now);

        let date = resolve_date(options.initial_value.as_ref(), bounds.year_bounds(), now);
        let date = bounds.clamp_date(date);
        let index = bounds.index_of(date);
        let (hour, minute) = resolve_time(options.initial_value.as_ref(), now);
        let (hour, minute) = bounds.clamp_time(date, hour, minute);

        let total_days = bounds.total_days();
        let date_labels: Vec<String> = (0..total_days)
            .map(|position| {
                let day = bounds.date_at(position);
                options
                    .format_date_label
                    .as_ref()
                    .map_or_else(|| day.to_string(), |format| format(day))
            })
            .collect();

        let date_column = WheelColumn::with_labels(
            options.column_spec(0, total_days - 1, false),
            index,
            Limit::new(0, total_days - 1),
            date_labels,
        );

        let window = bounds.time_window_for(date);
        let hour_column = WheelColumn::new(
            options.column_spec(0, 23, options.pad_hours_with_zero),
            hour,
            Limit::new(window.min_hour, window.max_hour),
        );
        let (minute_min, minute_max) = window.minute_limit_for_hour(hour);
        let minute_column = WheelColumn::new(
            options.column_spec(0, 59, options.pad_minutes_with_zero),
            minute,
            Limit::new(minute_min, minute_max),
        );

        let instant = PlainDateTime::new(date, hour, minute);
        let last_value = PickerValue {
            day: date.day(),
            month: date.month(),
            year: date.year(),
            hour,
            minute,
            date: instant,
        };

        Self {
            bounds,
            options,
            date: date_column,
            hour: hour_column,
            minute: minute_column,
            selected_index: index,
            selected_hour: hour,
            selected_minute: minute,
            initial_index: index,
            initial_hour: hour,
            initial_minute: minute,
            last_value,
            on_change: None,
            on_feedback: None,
        }
    }

    pub fn on_change(&mut self, handler: ChangeHandler) {
        self.on_change = Some(handler);
    }

    pub fn on_feedback(&mut self, handler: FeedbackHandler) {
        self.on_feedback = Some(handler);
    }

    pub fn attach_scroll_target(&mut self, field: DateTimeField, target: Box<dyn ScrollTarget>) {
        self.column_mut(field).attach_scroll_target(target);
    }

    pub fn column(&self, field: DateTimeField) -> &WheelColumn {
        match field {
            DateTimeField::Date => &self.date,
            DateTimeField::Hour => &self.hour,
            DateTimeField::Minute => &self.minute,
        }
    }

    fn column_mut(&mut self, field: DateTimeField) -> &mut WheelColumn {
        match field {
            DateTimeField::Date => &mut self.date,
            DateTimeField::Hour => &mut self.hour,
            DateTimeField::Minute => &mut self.minute,
        }
    }

    pub const fn column_order(&self) -> [DateTimeField; 3] {
        self.options.date_time_order
    }

    pub const fn bounds(&self) -> &DateTimeBounds {
        &self.bounds
    }

    pub const fn value(&self) -> PickerValue {
        self.last_value
    }

    /// The calendar date currently selected by the date column
    pub fn selected_date(&self) -> PlainDate {
        self.bounds.date_at(self.selected_index)
    }

    /// A momentum scroll on one column came to rest
    pub fn settled(&mut self, field: DateTimeField, y_offset: f64, item_height: f64) {
        let value = self.column_mut(field).settle(y_offset, item_height);
        debug!(column = %field, value, "column settled");

        match field {
            DateTimeField::Date => self.selected_index = value,
            DateTimeField::Hour => self.selected_hour = value,
            DateTimeField::Minute => self.selected_minute = value,
        }

        self.sync_time();
        self.emit();
        self.feedback();
    }

    pub fn visible_index_changed(&mut self, field: DateTimeField, index: usize) {
        self.column_mut(field).visible_index_changed(index);
    }

    /// Applies an explicit selection; missing fields keep their current
    /// values
    pub fn set_value(&mut self, input: DateInput, animated: bool) {
        let current_date = self.selected_date();
        let parts = input.parts();
        let merged = DateInput::Parts(PartialDate {
            year: parts.year.or(Some(current_date.year())),
            month: parts.month.or(Some(current_date.month())),
            day: parts.day.or(Some(current_date.day())),
            hour: parts.hour.or(Some(self.selected_hour)),
            minute: parts.minute.or(Some(self.selected_minute)),
        });
        let current = PlainDateTime::new(current_date, self.selected_hour, self.selected_minute);

        let date = resolve_date(Some(&merged), self.bounds.year_bounds(), &current);
        let date = self.bounds.clamp_date(date);
        let (hour, minute) = resolve_time(Some(&merged), &current);

        self.selected_index = self.bounds.index_of(date);
        self.selected_hour = hour;
        self.selected_minute = minute;
        self.sync_time();

        self.date.set_value(self.selected_index, animated);
        self.hour.set_value(self.selected_hour, animated);
        self.minute.set_value(self.selected_minute, animated);
        self.emit();
    }

    /// Returns to the initially resolved selection
    pub fn reset(&mut self, animated: bool) {
        self.selected_index = self.initial_index;
        self.selected_hour = self.initial_hour;
        self.selected_minute = self.initial_minute;
        self.sync_time();

        self.date.set_value(self.selected_index, animated);
        self.hour.set_value(self.selected_hour, animated);
        self.minute.set_value(self.selected_minute, animated);
        self.emit();
    }

    pub fn increment(&mut self, field: DateTimeField) {
        self.step(field, 1);
    }

    pub fn decrement(&mut self, field: DateTimeField) {
        self.step(field, -1);
    }

    fn step(&mut self, field: DateTimeField, delta: i64) {
        let parts = match field {
            DateTimeField::Date => {
                let next = self.bounds.date_at(self.selected_index + delta);
                PartialDate {
                    year: Some(next.year()),
                    month: Some(next.month()),
                    day: Some(next.day()),
                    ..PartialDate::default()
                }
            }
            DateTimeField::Hour => PartialDate {
                hour: Some(self.selected_hour + delta),
                ..PartialDate::default()
            },
            DateTimeField::Minute => PartialDate {
                minute: Some(self.selected_minute + delta),
                ..PartialDate::default()
            },
        };
        self.set_value(DateInput::Parts(parts), true);
    }

    /// The selection as a screen-reader string: the date label followed by
    /// the time
    pub fn accessibility_text(&self) -> String {
        let date = self.selected_date();
        let date_label = self
            .options
            .format_date_label
            .as_ref()
            .map_or_else(|| date.to_string(), |format| format(date));
        let hour = format_component(self.selected_hour, self.options.pad_hours_with_zero);
        let minute = format_component(self.selected_minute, self.options.pad_minutes_with_zero);
        format!("{date_label} {hour}:{minute}")
    }

    /// Re-derives the hour and minute constraints for the selected date and
    /// snaps the downstream selections that fell outside them
    fn sync_time(&mut self) {
        let date = self.selected_date();
        let window = self.bounds.time_window_for(date);
        let (hour, minute) = window.clamp(self.selected_hour, self.selected_minute);

        self.hour
            .set_limit(Limit::new(window.min_hour, window.max_hour));
        if hour != self.selected_hour {
            self.selected_hour = hour;
            self.hour.set_value(hour, false);
        }

        let (minute_min, minute_max) = window.minute_limit_for_hour(self.selected_hour);
        self.minute.set_limit(Limit::new(minute_min, minute_max));
        if minute != self.selected_minute {
            self.selected_minute = minute;
            self.minute.set_value(minute, false);
        }
    }

    fn compose(&self) -> PickerValue {
        let date = self.selected_date();
        let instant = PlainDateTime::new(date, self.selected_hour, self.selected_minute);
        PickerValue {
            day: date.day(),
            month: date.month(),
            year: date.year(),
            hour: self.selected_hour,
            minute: self.selected_minute,
            date: instant,
        }
    }

    fn emit(&mut self) {
        let next = self.compose();
        if next == self.last_value {
            return;
        }
        self.last_value = next;
        if let Some(handler) = self.on_change.as_mut() {
            handler(&next);
        }
    }

    fn feedback(&mut self) {
        if let Some(handler) = self.on_feedback.as_mut() {
            handler();
        }
    }
}
