use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::payload::StatisticsPayload;
use crate::ui::charting::format_label;
use crate::ui::section::{muted_style, title_style, Section, SlideContent, Stat, FAINT, GOLD};
use crate::ui::slides::persona::persona_color;
use crate::util::group_thousands;

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let persona = &data.persona.dominant_persona;
    let mut content = SlideContent::new(width);
    content
        .spacer(1)
        .line(Line::from(Span::styled("THAT'S A WRAP", muted_style())))
        .heading("Your 2025 Summary", None)
        .spacer(1)
        .push(Section::Stats(vec![
            Stat::new(format_label(data.comparisons.max_wpm), "Top WPM").highlighted(),
            Stat::new(
                format!("{}%", format_label(data.accuracy.overall_accuracy)),
                "Accuracy",
            ),
            Stat::new(group_thousands(data.year_in_numbers.total_tests), "Tests"),
            Stat::new(data.year_in_numbers.longest_streak.to_string(), "Day Streak"),
        ]))
        .spacer(1)
        .line(Line::from(vec![
            Span::raw(format!("{} ", persona.kind.icon())),
            Span::styled(
                persona.name.clone(),
                title_style().fg(persona_color(persona.kind)),
            ),
        ]))
        .spacer(1)
        .line(Line::from(vec![
            Span::styled("top ", muted_style()),
            Span::styled(
                format!("{}%", format_label(data.top_percent())),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" of all typists worldwide", muted_style()),
        ]))
        .spacer(1)
        .paragraph("Keep typing. Keep improving.", title_style())
        .spacer(1)
        .paragraph("[t] share on X   [e] export card", Style::default().fg(FAINT))
        .paragraph(
            "Made with love for the Monkeytype community",
            Style::default().fg(FAINT),
        );
    content
}
