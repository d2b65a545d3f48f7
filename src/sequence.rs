use crate::consts::MIN_LABEL_WIDTH;
use crate::scroll::ResolvedColumn;

/// Generates the full label list for a column: every value in the sequence
/// formatted at a fixed width, repeated `repeat` times, with empty
/// placeholder rows at both ends when infinite scroll is off.
pub fn generate_labels(column: &ResolvedColumn) -> Vec<String> {
    let width = label_width(column);
    let base = (0..column.number_of_items)
        .map(|step| {
            let value = column.start_from + step * column.interval;
            format_number(value, width, column.pad_numbers_with_zero)
        })
        .collect();
    repeat_and_pad(base, column)
}

/// 12-hour clock variant: the column values are hours `0..=23` and each
/// label carries an AM/PM suffix. Midnight renders as 0, noon as 12.
pub fn generate_12_hour_labels(column: &ResolvedColumn) -> Vec<String> {
    let base = (0..column.number_of_items)
        .map(|step| {
            let hour = column.start_from + step * column.interval;
            let display = if hour % 12 == 0 && hour != 0 {
                12
            } else {
                hour % 12
            };
            let suffix = if hour < 12 { "AM" } else { "PM" };
            format!(
                "{} {suffix}",
                format_number(display, MIN_LABEL_WIDTH, column.pad_numbers_with_zero)
            )
        })
        .collect();
    repeat_and_pad(base, column)
}

/// Repeats a base sequence of labels into the full list shape described by
/// the column. The base must hold one label per sequence value.
pub fn repeat_and_pad(base: Vec<String>, column: &ResolvedColumn) -> Vec<String> {
    let pad = if column.disable_infinite_scroll {
        usize::try_from(column.pad_with_n_items).unwrap_or(0)
    } else {
        0
    };

    let mut labels = Vec::with_capacity(column.list_len());
    labels.resize(pad, String::new());
    for _ in 0..column.repeat {
        labels.extend(base.iter().cloned());
    }
    labels.extend(std::iter::repeat_n(String::new(), pad));
    labels
}

/// Fraction of the column height the fade-out overlay covers at each end:
/// exactly one row when placeholders frame the selection, otherwise a fixed
/// share of the viewport
pub fn gradient_fade_fraction(pad_with_n_items: i64) -> f64 {
    if pad_with_n_items > 0 {
        #[allow(clippy::cast_precision_loss)]
        let rows = (pad_with_n_items * 2 + 1) as f64;
        1.0 / rows
    } else {
        0.3
    }
}

fn label_width(column: &ResolvedColumn) -> usize {
    let min_width = column.absolute_minimum().to_string().len();
    let max_width = column.absolute_maximum().to_string().len();
    min_width.max(max_width).max(MIN_LABEL_WIDTH)
}

fn format_number(value: i64, width: usize, pad_with_zero: bool) -> String {
    if pad_with_zero {
        format!("{value:0width$}")
    } else {
        format!("{value:width$}")
    }
}
