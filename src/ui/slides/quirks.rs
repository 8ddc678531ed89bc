use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::payload::{RestartAddiction, StatisticsPayload};
use crate::ui::charting::format_label;
use crate::ui::section::{muted_style, title_style, Section, SlideContent, Stat, GOLD, MUTED};
use crate::util::group_thousands;

fn addiction_color(level: RestartAddiction) -> Color {
    match level {
        RestartAddiction::Low => Color::Rgb(34, 197, 94),
        RestartAddiction::Moderate => Color::Rgb(234, 179, 8),
        RestartAddiction::High => Color::Rgb(249, 115, 22),
        RestartAddiction::Extreme => Color::Rgb(239, 68, 68),
        RestartAddiction::Unrated => MUTED,
    }
}

fn addiction_ratio(level: RestartAddiction) -> f64 {
    match level {
        RestartAddiction::Low => 0.25,
        RestartAddiction::Moderate => 0.5,
        RestartAddiction::High => 0.75,
        RestartAddiction::Extreme => 1.0,
        RestartAddiction::Unrated => 0.0,
    }
}

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let quirks = &data.quirks;
    let level = quirks.restart_addiction_level;
    let hours_wasted = quirks.time_wasted_minutes / 60.0;

    let mut content = SlideContent::new(width);
    content
        .spacer(1)
        .heading("Your Quirks", Some("The habits that make you unique"))
        .spacer(1)
        .push(Section::Meter {
            label: "Restart Addiction".into(),
            caption: level.to_string(),
            ratio: addiction_ratio(level),
            color: addiction_color(level),
        })
        .spacer(1)
        .push(Section::Stats(vec![
            Stat::new(format_label(quirks.avg_restarts), "Avg Restarts"),
            Stat::new(quirks.max_restarts.to_string(), "Most in a Row"),
            Stat::new(format!("{}%", format_label(quirks.first_try_pct)), "First Try").highlighted(),
        ]))
        .push(Section::Meter {
            label: "First Try Success Rate".into(),
            caption: format!("{}%", format_label(quirks.first_try_pct)),
            ratio: quirks.first_try_pct / 100.0,
            color: GOLD,
        })
        .spacer(1)
        .line(Line::from(vec![
            Span::styled(format!("{:.1}", hours_wasted), title_style()),
            Span::styled(" hours \"wasted\" on restarts", muted_style()),
        ]))
        .paragraph("(but were they really wasted?)", Style::default().fg(MUTED))
        .spacer(1)
        .line(Line::from(Span::styled("Favorite Test Mode", muted_style())))
        .line(Line::from(Span::styled(quirks.favorite_mode.clone(), title_style())))
        .paragraph(
            &format!(
                "Your go-to challenge, {} times",
                group_thousands(quirks.favorite_mode_count as u64)
            ),
            muted_style(),
        );
    content
}
