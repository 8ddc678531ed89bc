use itertools::{Itertools, MinMaxResult};

/// Smallest and largest value of a series, ignoring NaN ordering quirks.
pub fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    match data.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

/// Position of `value` within `[min, max]` as 0..=1.
///
/// A degenerate range maps everything to full intensity.
pub fn intensity(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        return 1.0;
    }
    ((value - min) / range).clamp(0.0, 1.0)
}

/// Intensity of every element relative to the series' own min/max.
pub fn intensities(data: &[f64]) -> Vec<f64> {
    match min_max(data) {
        Some((min, max)) => data.iter().map(|v| intensity(*v, min, max)).collect(),
        None => Vec::new(),
    }
}

/// Fraction of the series maximum, used for bar heights.
pub fn ratio_of_max(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max).clamp(0.0, 1.0)
    }
}

/// Thousands separators, e.g. `847392` -> `847,392`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
