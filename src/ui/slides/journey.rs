use chrono::NaiveDate;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::geometry::padded_heights;
use crate::payload::StatisticsPayload;
use crate::ui::charting::format_label;
use crate::ui::section::{bold_style, muted_style, BarSpec, Section, SlideContent, Stat, GOLD};

const CHART_HEIGHT: u16 = 12;

/// `2024-10` as a calendar month, if it is one.
fn parse_period(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

/// Three-letter bar label: `2024-10` and `October` both become `Oct`.
fn short_month(month: &str) -> String {
    match parse_period(month) {
        Some(date) => date.format("%b").to_string(),
        None => month.get(..3).unwrap_or(month).to_string(),
    }
}

/// Long form for prose: `2024-10` becomes `October 2024`, names pass through.
fn long_month(month: &str) -> String {
    match parse_period(month) {
        Some(date) => date.format("%B %Y").to_string(),
        None => month.to_string(),
    }
}

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let journey = &data.journey;
    let averages: Vec<f64> = journey.monthly_trend.iter().map(|m| m.avg_wpm).collect();
    let exact_best = journey
        .monthly_trend
        .iter()
        .any(|m| m.month == journey.best_month);
    let best = short_month(&journey.best_month);

    let bars: Vec<BarSpec> = journey
        .monthly_trend
        .iter()
        .zip(padded_heights(&averages))
        .map(|(month, height)| BarSpec {
            label: short_month(&month.month),
            height: height.round() as u64,
            text: format!("{:.0}", month.avg_wpm),
            highlight: if exact_best {
                month.month == journey.best_month
            } else {
                short_month(&month.month) == best
            },
        })
        .collect();

    let sign = if journey.improvement >= 0.0 { "+" } else { "" };
    let mut content = SlideContent::new(width);
    content
        .spacer(1)
        .heading(
            "Your Journey",
            Some("From where you started to where you are now"),
        )
        .spacer(1)
        .push(Section::Stats(vec![
            Stat::new(format_label(journey.first_month_avg), "First Month WPM"),
            Stat::new(
                format!("{sign}{}%", format_label(journey.improvement)),
                "Improvement",
            )
            .highlighted(),
            Stat::new(format_label(journey.last_month_avg), "Latest Month WPM"),
        ]))
        .spacer(1);
    if !bars.is_empty() {
        content
            .push(Section::Bars {
                bars,
                height: CHART_HEIGHT,
            })
            .spacer(1);
    }
    content
        .line(Line::from(vec![
            Span::styled("Best Month: ", muted_style()),
            Span::styled(long_month(&journey.best_month), Style::default().fg(GOLD)),
            Span::styled(
                format!(" ({} WPM)", format_label(journey.best_month_wpm)),
                bold_style(),
            ),
        ]))
        .paragraph(
            &format!(
                "Biggest jump in {}: +{} WPM",
                long_month(&journey.biggest_jump_month),
                format_label(journey.biggest_jump_amount)
            ),
            muted_style(),
        );
    content
}
