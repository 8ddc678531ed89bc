//! Axis helpers for the slide charts.

use crate::geometry::warmup_points;
use crate::util::min_max;

/// Height of the warmup frame the curve points are laid out in.
pub const WARMUP_FRAME_HEIGHT: f64 = 300.0;
pub const WARMUP_FRAME_WIDTH: f64 = 600.0;

// Vertical padding the curve keeps from the frame edges.
const WARMUP_PAD: f64 = 20.0;
const WARMUP_SPAN: f64 = 260.0;

/// Format a numeric label: whole numbers bare, otherwise one decimal.
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.1}")
    }
}

/// `count` evenly spaced labels from the low to the high bound.
pub fn axis_labels(bounds: [f64; 2], count: usize) -> Vec<String> {
    match count {
        0 => Vec::new(),
        1 => vec![format_label(bounds[0].round())],
        _ => (0..count)
            .map(|i| {
                let t = i as f64 / (count - 1) as f64;
                format_label((bounds[0] + (bounds[1] - bounds[0]) * t).round())
            })
            .collect(),
    }
}

/// Warmup curve in chart space, y growing upwards within the frame.
pub fn warmup_chart_points(values: &[f64]) -> Vec<(f64, f64)> {
    warmup_points(values)
        .into_iter()
        .map(|(x, y)| (x, WARMUP_FRAME_HEIGHT - y))
        .collect()
}

/// WPM at the bottom and top edge of the warmup frame.
pub fn warmup_value_bounds(values: &[f64]) -> Option<[f64; 2]> {
    let (min, max) = min_max(values)?;
    let per_unit = (max - min) / WARMUP_SPAN;
    Some([min - WARMUP_PAD * per_unit, max + WARMUP_PAD * per_unit])
}
