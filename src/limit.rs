use crate::scroll::ResolvedColumn;
use serde::{Deserialize, Serialize};

/// A caller-requested selection limit on a column. Either side may be
/// omitted; the column's own range fills the gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limit {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Limit {
    /// A limit with both sides set
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// No limit beyond the column's own range
    pub const fn none() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Normalizes the limit against a column: both sides are snapped onto
    /// the column's value grid, pulled inside its absolute range, and an
    /// inverted or otherwise invalid pair resets to the full range.
    pub fn adjusted(&self, column: &ResolvedColumn) -> AdjustedLimit {
        let full = AdjustedLimit {
            min: column.absolute_minimum(),
            max: column.absolute_maximum(),
        };
        if self.min.is_none() && self.max.is_none() {
            return full;
        }

        let min = self.min.map_or(full.min, |requested| {
            align_up(requested, column).max(full.min)
        });
        let max = self.max.map_or(full.max, |requested| {
            align_down(requested, column).min(full.max)
        });

        if max < min { full } else { AdjustedLimit { min, max } }
    }
}

/// Snaps a requested bound up to the next on-grid value
fn align_up(value: i64, column: &ResolvedColumn) -> i64 {
    let steps = -(column.start_from - value).div_euclid(column.interval);
    column.start_from + steps * column.interval
}

/// Snaps a requested bound down to the previous on-grid value
fn align_down(value: i64, column: &ResolvedColumn) -> i64 {
    let steps = (value - column.start_from).div_euclid(column.interval);
    column.start_from + steps * column.interval
}

/// A limit resolved against a concrete column: both sides are always
/// present, on-grid, inside the column's range and never inverted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustedLimit {
    pub min: i64,
    pub max: i64,
}

impl AdjustedLimit {
    pub const fn contains(self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    pub const fn clamp(self, value: i64) -> i64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}
