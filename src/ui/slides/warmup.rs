use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::payload::StatisticsPayload;
use crate::ui::charting::{
    axis_labels, format_label, warmup_chart_points, warmup_value_bounds, WARMUP_FRAME_HEIGHT,
    WARMUP_FRAME_WIDTH,
};
use crate::ui::section::{
    bold_style, muted_style, title_style, ChartSpec, Section, SlideContent, Stat,
};

const CHART_HEIGHT: u16 = 12;

fn curve(data: &StatisticsPayload) -> Option<ChartSpec> {
    let curve = &data.warmup.warmup_curve;
    let wpms: Vec<f64> = curve.iter().map(|p| p.avg_wpm).collect();
    let value_bounds = warmup_value_bounds(&wpms)?;
    let x_labels = match (curve.first(), curve.last()) {
        (Some(first), Some(last)) if curve.len() > 1 => vec![
            format!("test {}", first.test_number),
            format!("test {}", last.test_number),
        ],
        _ => Vec::new(),
    };
    Some(ChartSpec {
        points: warmup_chart_points(&wpms),
        x_bounds: [0.0, WARMUP_FRAME_WIDTH],
        y_bounds: [0.0, WARMUP_FRAME_HEIGHT],
        x_labels,
        y_labels: axis_labels(value_bounds, 3),
        height: CHART_HEIGHT,
    })
}

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let warmup = &data.warmup;
    let mut content = SlideContent::new(width);
    content
        .spacer(1)
        .heading(
            "The Warmup Effect",
            Some("How your speed changes as you get into the zone"),
        )
        .spacer(1)
        .push(Section::Stats(vec![
            Stat::new(format_label(warmup.cold_start_wpm), "Cold Start"),
            Stat::new(format_label(warmup.warmed_up_wpm), "Warmed Up Peak").highlighted(),
            Stat::new(format!("{:.1}", warmup.tests_until_peak), "Tests to Peak"),
        ]))
        .spacer(1);
    if let Some(spec) = curve(data) {
        content.push(Section::Chart(spec)).spacer(1);
    }
    content
        .line(Line::from(vec![
            Span::styled("Warmup boost: ", muted_style()),
            Span::styled(
                format!(
                    "+{} WPM (+{}%)",
                    format_label(warmup.warmup_improvement),
                    format_label(warmup.warmup_improvement_percent)
                ),
                bold_style(),
            ),
        ]))
        .spacer(1)
        .line(Line::from(Span::styled(
            warmup.warmup_quality.clone(),
            title_style(),
        )))
        .paragraph(&warmup.warmup_message, Style::default())
        .spacer(1)
        .paragraph(
            &format!(
                "{} sessions · {} tests per session · longest run {}",
                warmup.total_sessions,
                format_label(warmup.avg_tests_per_session),
                warmup.longest_session
            ),
            muted_style(),
        );
    content
}
