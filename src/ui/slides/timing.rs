use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::geometry::format_hour;
use crate::payload::StatisticsPayload;
use crate::ui::charting::format_label;
use crate::ui::section::{
    bold_style, muted_style, title_style, HeatCell, RowBar, Section, SlideContent, Stat, GOLD,
    MUTED,
};
use crate::util::{intensities, ratio_of_max};

/// Hours per heatmap row; wide terminals fit the whole day on two rows.
fn heat_columns(width: u16) -> usize {
    if width >= 72 {
        12
    } else if width >= 48 {
        8
    } else {
        6
    }
}

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let timing = &data.timing;
    let wpms: Vec<f64> = timing.hourly_breakdown.iter().map(|h| h.avg_wpm).collect();
    let cells: Vec<HeatCell> = timing
        .hourly_breakdown
        .iter()
        .zip(intensities(&wpms))
        .map(|(hour, intensity)| HeatCell {
            label: format_hour(hour.hour),
            value: format!("{:.0}", hour.avg_wpm),
            intensity,
        })
        .collect();

    let max_daily = timing
        .daily_breakdown
        .iter()
        .map(|d| d.avg_wpm)
        .fold(0.0, f64::max);
    let days: Vec<RowBar> = timing
        .daily_breakdown
        .iter()
        .map(|d| RowBar {
            label: d.day.get(..3).unwrap_or(&d.day).to_string(),
            ratio: ratio_of_max(d.avg_wpm, max_daily),
            value: format!("{:.1}", d.avg_wpm),
            color: if d.day == timing.best_day {
                GOLD
            } else {
                MUTED
            },
        })
        .collect();

    let mut content = SlideContent::new(width);
    content
        .spacer(1)
        .heading(
            "When You Type Best",
            Some("Your performance throughout the day"),
        )
        .spacer(1)
        .push(Section::Stats(vec![
            Stat::new(
                format!("{} · {} WPM", timing.best_hour_formatted, format_label(timing.best_hour_wpm)),
                "Peak Hour",
            )
            .highlighted(),
            Stat::new(
                format!(
                    "{} · {} WPM",
                    timing.worst_hour_formatted,
                    format_label(timing.worst_hour_wpm)
                ),
                "Slowest Hour",
            ),
            Stat::new(
                format!("{} · {}", timing.most_active_hour_formatted, timing.most_active_hour_count),
                "Most Active Hour",
            ),
        ]));
    if !cells.is_empty() {
        content
            .spacer(1)
            .paragraph("24-Hour Performance Map", muted_style())
            .spacer(1)
            .push(Section::Heatmap {
                cells,
                columns: heat_columns(width),
            });
    }
    if !days.is_empty() {
        content.spacer(1).push(Section::Rows(days));
    }
    content
        .spacer(1)
        .line(Line::from(vec![
            Span::styled("You're a ", muted_style()),
            Span::styled(timing.time_preference.clone(), title_style()),
        ]))
        .paragraph(&timing.time_description, Style::default())
        .line(Line::from(vec![
            Span::styled("Best day: ", muted_style()),
            Span::styled(
                format!("{} ({} WPM)", timing.best_day, format_label(timing.best_day_wpm)),
                bold_style(),
            ),
            Span::styled(
                format!(" · busiest: {}", timing.most_active_day),
                muted_style(),
            ),
        ]));
    content
}
