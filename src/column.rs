use crate::limit::{AdjustedLimit, Limit};
use crate::scroll::{ColumnSpec, ResolvedColumn};
use crate::sequence;
use std::fmt;
use tracing::debug;

/// Seam to the host's virtualized list. The engine never renders; it only
/// tells the list which row should sit in the selection slot.
pub trait ScrollTarget {
    fn scroll_to_index(&mut self, index: usize, animated: bool);
}

/// Imperative handle for one wheel column: owns the resolved spec, the
/// generated labels, the adjusted limit and the current selection, and
/// drives the attached [`ScrollTarget`].
pub struct WheelColumn {
    column: ResolvedColumn,
    labels: Vec<String>,
    limit: AdjustedLimit,
    value: i64,
    initial_value: i64,
    target: Option<Box<dyn ScrollTarget>>,
}

impl fmt::Debug for WheelColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WheelColumn")
            .field("column", &self.column)
            .field("limit", &self.limit)
            .field("value", &self.value)
            .field("initial_value", &self.initial_value)
            .finish_non_exhaustive()
    }
}

impl WheelColumn {
    /// Resolves the spec, generates numeric labels, normalizes the limit
    /// and clamps the initial value into it
    pub fn new(spec: ColumnSpec, initial_value: i64, limit: Limit) -> Self {
        let column = spec.resolve();
        let labels = sequence::generate_labels(&column);
        Self::assemble(column, labels, limit, initial_value)
    }

    /// As [`WheelColumn::new`] with caller-provided labels, one per
    /// sequence value (repeats and placeholders are added here)
    pub fn with_labels(
        spec: ColumnSpec,
        initial_value: i64,
        limit: Limit,
        base_labels: Vec<String>,
    ) -> Self {
        let column = spec.resolve();
        debug_assert_eq!(
            base_labels.len(),
            usize::try_from(column.number_of_items).unwrap_or(0),
            "one label per sequence value"
        );
        let labels = sequence::repeat_and_pad(base_labels, &column);
        Self::assemble(column, labels, limit, initial_value)
    }

    fn assemble(
        column: ResolvedColumn,
        labels: Vec<String>,
        limit: Limit,
        initial_value: i64,
    ) -> Self {
        let adjusted = limit.adjusted(&column);
        let value = adjusted.clamp(initial_value);
        Self {
            column,
            labels,
            limit: adjusted,
            value,
            initial_value: value,
            target: None,
        }
    }

    /// Hooks up the host list and immediately positions it on the current
    /// value
    pub fn attach_scroll_target(&mut self, target: Box<dyn ScrollTarget>) {
        self.target = Some(target);
        let index = self.index_for(self.value);
        self.scroll_to(index, false);
    }

    /// Handles the end of a momentum scroll: maps the offset to a value
    /// and, when it overshoots the limit, issues an animated correction
    /// scroll to the nearest allowed row. Returns the accepted value.
    pub fn settle(&mut self, y_offset: f64, item_height: f64) -> i64 {
        let (mut value, index) = self.column.value_and_index_from_offset(y_offset, item_height);

        if value > self.limit.max {
            let steps = (value - self.limit.max) / self.column.interval;
            let corrected = self.clamp_index(index - steps);
            debug!(value, max = self.limit.max, "settled above limit");
            self.scroll_to(corrected, true);
            value = self.limit.max;
        } else if value < self.limit.min {
            let steps = (self.limit.min - value) / self.column.interval;
            let corrected = self.clamp_index(index + steps);
            debug!(value, min = self.limit.min, "settled below limit");
            self.scroll_to(corrected, true);
            value = self.limit.min;
        }

        self.value = value;
        value
    }

    /// Selects a value (clamped into the limit) and scrolls the list to it
    pub fn set_value(&mut self, value: i64, animated: bool) {
        let value = self.limit.clamp(value);
        self.value = value;
        let index = self.index_for(value);
        self.scroll_to(index, animated);
    }

    /// Returns to the initially resolved value
    pub fn reset(&mut self, animated: bool) {
        self.set_value(self.initial_value, animated);
    }

    /// Rebuilds the column for a new spec and limit, used when a dependent
    /// range shifts (a month column after the year changes). Regenerates
    /// numeric labels; custom label sets do not survive a reconfigure.
    /// Keeps the current selection where possible and snaps to the nearest
    /// valid row without animation.
    pub fn reconfigure(&mut self, spec: ColumnSpec, limit: Limit, keep_value: bool) {
        let column = spec.resolve();
        self.labels = sequence::generate_labels(&column);
        self.column = column;
        self.limit = limit.adjusted(&column);

        let wanted = if keep_value {
            self.value
        } else {
            self.initial_value
        };
        self.value = self.limit.clamp(wanted);
        let index = self.index_for(self.value);
        self.scroll_to(index, false);
    }

    /// Limit-only update for columns whose value range never changes (hour
    /// and minute columns). Snaps the selection without animation when the
    /// new limit pushed it out.
    pub fn set_limit(&mut self, limit: Limit) {
        self.limit = limit.adjusted(&self.column);
        if !self.limit.contains(self.value) {
            let snapped = self.limit.clamp(self.value);
            debug!(from = self.value, to = snapped, "limit change moved selection");
            self.value = snapped;
            let index = self.index_for(snapped);
            self.scroll_to(index, false);
        }
    }

    /// Viewport tick from the host list: silently recenters the repeated
    /// list when the viewport drifts near either end
    pub fn visible_index_changed(&mut self, index: usize) {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        if let Some(jump) = self.column.recenter_jump(index) {
            debug!(from = index, to = jump, "recentering");
            let jump = self.clamp_index(jump);
            self.scroll_to(jump, false);
        }
    }

    /// One step up the sequence, clamped to the limit (accessibility
    /// increment). Returns the new value.
    pub fn step_up(&mut self) -> i64 {
        let next = (self.value + self.column.interval).min(self.limit.max);
        self.set_value(next, true);
        next
    }

    /// One step down the sequence, clamped to the limit
    pub fn step_down(&mut self) -> i64 {
        let next = (self.value - self.column.interval).max(self.limit.min);
        self.set_value(next, true);
        next
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    pub const fn initial_value(&self) -> i64 {
        self.initial_value
    }

    pub const fn resolved(&self) -> &ResolvedColumn {
        &self.column
    }

    pub const fn adjusted_limit(&self) -> AdjustedLimit {
        self.limit
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether a value is on the column's grid and inside the limit
    pub fn is_selectable(&self, value: i64) -> bool {
        (value - self.column.start_from).rem_euclid(self.column.interval) == 0
            && self.limit.contains(value)
    }

    fn index_for(&self, value: i64) -> usize {
        self.clamp_index(i64::try_from(self.column.initial_scroll_index(value)).unwrap_or(0))
    }

    fn clamp_index(&self, index: i64) -> usize {
        let last = i64::try_from(self.len().saturating_sub(1)).unwrap_or(0);
        usize::try_from(index.clamp(0, last)).unwrap_or(0)
    }

    fn scroll_to(&mut self, index: usize, animated: bool) {
        if let Some(target) = self.target.as_mut() {
            target.scroll_to_index(index, animated);
        }
    }
}
