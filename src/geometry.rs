//! Pure derivations shared by the slide renderers and the share card:
//! pie segments from percentages, chart coordinates from magnitudes and
//! SVG path data.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::util::{intensity, min_max};

/// Donut radius the share card draws with.
pub const PIE_RADIUS: f64 = 40.0;

const DEGREES_PER_PERCENT: f64 = 3.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSegment {
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSegment {
    /// Visible stroke length of this segment on a circle of `radius`.
    pub fn dash_array(&self, radius: f64) -> f64 {
        (self.percentage / 100.0) * circumference(radius)
    }

    /// Stroke offset that rotates the segment to its start angle.
    pub fn dash_offset(&self, radius: f64) -> f64 {
        -((self.start_angle / 360.0) * circumference(radius))
    }

    /// Share of a full turn covered before this segment starts, 0..=1.
    pub fn start_fraction(&self) -> f64 {
        self.start_angle / 360.0
    }

    pub fn end_fraction(&self) -> f64 {
        self.end_angle / 360.0
    }
}

pub fn circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

/// Cumulative pie segments for a breakdown given in percent.
pub fn pie_segments(percentages: &[f64]) -> Vec<PieSegment> {
    let mut cumulative = 0.0;
    percentages
        .iter()
        .map(|&percentage| {
            let start_angle = cumulative * DEGREES_PER_PERCENT;
            cumulative += percentage;
            PieSegment {
                percentage,
                start_angle,
                end_angle: cumulative * DEGREES_PER_PERCENT,
            }
        })
        .collect()
}

/// Heights (0..=100) for the monthly trend, padded by 10 wpm on both ends so
/// neither extreme touches the frame.
pub fn padded_heights(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = min_max(values) else {
        return Vec::new();
    };
    let range = max - min;
    values
        .iter()
        .map(|v| ((v - min + 10.0) / (range + 20.0)) * 100.0)
        .collect()
}

/// Points of the monthly trend line in a 100x100 box, y growing downwards.
pub fn trend_points(values: &[f64]) -> Vec<(f64, f64)> {
    let n = values.len();
    padded_heights(values)
        .into_iter()
        .enumerate()
        .map(|(i, height)| (spread(i, n) * 100.0, 100.0 - height))
        .collect()
}

/// Points of the warmup curve in the 600x300 chart frame.
pub fn warmup_points(values: &[f64]) -> Vec<(f64, f64)> {
    let Some((min, max)) = min_max(values) else {
        return Vec::new();
    };
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = spread(i, n) * 580.0 + 10.0;
            let y = 280.0 - intensity(*v, min, max) * 260.0;
            (x, y)
        })
        .collect()
}

/// `i / (n - 1)`, centring a lone point.
fn spread(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.5
    } else {
        i as f64 / (n - 1) as f64
    }
}

/// SVG path data (`M x y L x y ...`) through the given points.
pub fn svg_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{cmd} {} {}", trim_float(*x), trim_float(*y));
    }
    d
}

fn trim_float(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// 12-hour clock label for an hour of the day.
pub fn format_hour(hour: u8) -> String {
    match hour {
        0 => "12AM".to_string(),
        12 => "12PM".to_string(),
        h if h > 12 => format!("{}PM", h - 12),
        h => format!("{h}AM"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_segments_accumulate_angles() {
        let segments = pie_segments(&[64.3, 14.0, 21.7]);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].start_angle, 0.0);
        assert!((segments[0].end_angle - 231.48).abs() < 1e-9);
        assert!((segments[1].start_angle - 231.48).abs() < 1e-9);
        assert!((segments[2].end_angle - 360.0).abs() < 1e-9);
    }

    #[test]
    fn pie_dash_values() {
        let segments = pie_segments(&[25.0, 75.0]);
        let c = circumference(PIE_RADIUS);
        assert!((segments[0].dash_array(PIE_RADIUS) - c / 4.0).abs() < 1e-9);
        assert_eq!(segments[0].dash_offset(PIE_RADIUS), 0.0);
        assert!((segments[1].dash_offset(PIE_RADIUS) + c / 4.0).abs() < 1e-9);
    }

    #[test]
    fn pie_fractions() {
        let segments = pie_segments(&[50.0, 50.0]);
        assert_eq!(segments[1].start_fraction(), 0.5);
        assert_eq!(segments[1].end_fraction(), 1.0);
    }

    #[test]
    fn padded_heights_keep_margin() {
        let heights = padded_heights(&[80.0, 100.0]);
        assert!((heights[0] - 25.0).abs() < 1e-9);
        assert!((heights[1] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn trend_points_span_the_box() {
        let points = trend_points(&[80.0, 90.0, 100.0]);
        assert_eq!(points[0].0, 0.0);
        assert_eq!(points[2].0, 100.0);
        assert!((points[0].1 - 75.0).abs() < 1e-9);
        assert!((points[2].1 - 25.0).abs() < 1e-9);
    }

    #[test]
    fn warmup_points_frame() {
        let points = warmup_points(&[90.0, 100.0, 110.0]);
        assert_eq!(points[0], (10.0, 280.0));
        assert_eq!(points[1], (300.0, 150.0));
        assert_eq!(points[2], (590.0, 20.0));
    }

    #[test]
    fn warmup_single_point_is_centred() {
        assert_eq!(warmup_points(&[100.0]), vec![(300.0, 20.0)]);
        assert!(warmup_points(&[]).is_empty());
    }

    #[test]
    fn svg_path_data() {
        assert_eq!(svg_path(&[]), "");
        assert_eq!(
            svg_path(&[(10.0, 280.0), (300.0, 150.5), (590.0, 20.126)]),
            "M 10 280 L 300 150.5 L 590 20.13"
        );
    }

    #[test]
    fn hour_labels() {
        assert_eq!(format_hour(0), "12AM");
        assert_eq!(format_hour(7), "7AM");
        assert_eq!(format_hour(12), "12PM");
        assert_eq!(format_hour(22), "10PM");
    }
}
