use crate::consts::{AUTO_REPEAT_TARGET, MAX_PAD_ITEMS};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Caller-facing description of one wheel column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    /// Step between consecutive values; non-positive values are repaired to 1
    pub interval: i64,
    /// First (smallest) selectable value
    pub start_from: i64,
    /// Last selectable value; below `start_from` collapses to a single item
    pub maximum_value: i64,
    /// Placeholder rows either side of the selection, clamped to `0..=10`
    pub pad_with_n_items: i64,
    /// How many times the sequence repeats; `None` derives a value from the
    /// sequence length
    pub repeat: Option<i64>,
    /// Disables wraparound; the list is padded with placeholders instead
    pub disable_infinite_scroll: bool,
    /// Pad labels with leading zeros instead of spaces
    pub pad_numbers_with_zero: bool,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            interval: 1,
            start_from: 0,
            maximum_value: 0,
            pad_with_n_items: 2,
            repeat: None,
            disable_infinite_scroll: false,
            pad_numbers_with_zero: false,
        }
    }
}

impl ColumnSpec {
    /// Validates the spec and fixes the derived quantities the conversion
    /// arithmetic depends on
    pub fn resolve(&self) -> ResolvedColumn {
        let interval = if self.interval > 0 {
            self.interval
        } else {
            warn!(interval = self.interval, "non-positive interval, using 1");
            1
        };

        let number_of_items = if self.maximum_value < self.start_from {
            1
        } else {
            (self.maximum_value - self.start_from) / interval + 1
        };

        ResolvedColumn {
            interval,
            start_from: self.start_from,
            number_of_items,
            pad_with_n_items: self.pad_with_n_items.clamp(0, MAX_PAD_ITEMS),
            repeat: effective_repeat(number_of_items, self.repeat, self.disable_infinite_scroll),
            disable_infinite_scroll: self.disable_infinite_scroll,
            pad_numbers_with_zero: self.pad_numbers_with_zero,
        }
    }
}

fn effective_repeat(number_of_items: i64, explicit: Option<i64>, disable_infinite: bool) -> i64 {
    // no point repeating a single option
    if number_of_items == 1 {
        return 1;
    }

    match explicit {
        // infinite scroll needs at least two repeats so recentering never
        // scrolls out of bounds
        Some(repeat) if !disable_infinite && repeat < 2 => 2,
        Some(repeat) if repeat < 1 => 1,
        Some(repeat) => repeat,
        None => {
            // aim for a fixed row count: frequent enough repeats to hide
            // the list edges without rendering too many rows
            let dynamic = ((AUTO_REPEAT_TARGET + number_of_items / 2) / number_of_items).max(1);
            if disable_infinite { dynamic } else { dynamic.max(2) }
        }
    }
}

/// A [`ColumnSpec`] with its derived quantities fixed: the item count, the
/// effective repeat count and a validated interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub interval: i64,
    pub start_from: i64,
    pub number_of_items: i64,
    pub pad_with_n_items: i64,
    pub repeat: i64,
    pub disable_infinite_scroll: bool,
    pub pad_numbers_with_zero: bool,
}

impl ResolvedColumn {
    /// Smallest selectable value
    pub const fn absolute_minimum(&self) -> i64 {
        self.start_from
    }

    /// Largest selectable value
    pub const fn absolute_maximum(&self) -> i64 {
        self.start_from + (self.number_of_items - 1) * self.interval
    }

    /// Total rows in the generated list: the repeated sequence plus, when
    /// infinite scroll is off, the placeholder rows at both ends
    pub fn list_len(&self) -> usize {
        let extra = if self.disable_infinite_scroll {
            2 * self.pad_with_n_items
        } else {
            0
        };
        usize::try_from(self.number_of_items * self.repeat + extra).unwrap_or(0)
    }

    /// Row index that shows `value` centered in the repeated list. Values
    /// off the end of the sequence wrap around onto it.
    pub fn initial_scroll_index(&self, value: i64) -> usize {
        let base = (value - self.start_from)
            .div_euclid(self.interval)
            .rem_euclid(self.number_of_items);
        let pad_offset = if self.disable_infinite_scroll {
            0
        } else {
            self.pad_with_n_items
        };
        let index = self.number_of_items * (self.repeat / 2) + base - pad_offset;
        usize::try_from(index.max(0)).unwrap_or(0)
    }

    /// Maps a settled scroll offset to the selected value and the row index
    /// the offset corresponds to
    pub fn value_and_index_from_offset(&self, y_offset: f64, item_height: f64) -> (i64, i64) {
        let index = if item_height > 0.0 {
            #[allow(clippy::cast_possible_truncation)]
            let rounded = (y_offset / item_height).round() as i64;
            rounded.max(0)
        } else {
            warn!(item_height, "non-positive item height, using row 0");
            0
        };

        let slot = if self.disable_infinite_scroll {
            index
        } else {
            index + self.pad_with_n_items
        };
        let value = slot.rem_euclid(self.number_of_items) * self.interval + self.start_from;
        (value, index)
    }

    /// Silent-recentering arithmetic: when the viewport drifts into the
    /// first or last half-period of the repeated list, returns the row the
    /// list should jump to so the same value shows nearer the middle
    pub fn recenter_jump(&self, visible_index: i64) -> Option<i64> {
        if self.disable_infinite_scroll || self.number_of_items <= 1 {
            return None;
        }

        // compare doubled indexes so the half-period thresholds stay integral
        if 2 * visible_index < self.number_of_items {
            Some(visible_index + self.number_of_items)
        } else if 2 * visible_index >= self.number_of_items * (2 * self.repeat - 1) {
            Some(visible_index - self.number_of_items)
        } else {
            None
        }
    }
}
