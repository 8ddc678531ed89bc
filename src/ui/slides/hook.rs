use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::payload::StatisticsPayload;
use crate::ui::section::{muted_style, title_style, SlideContent, FAINT, GOLD};
use crate::util::group_thousands;

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let hook = &data.hook;
    let mut content = SlideContent::new(width);
    content
        .spacer(2)
        .line(Line::from(Span::styled("⌨  2025 WRAPPED", title_style())))
        .spacer(2)
        .line(Line::from(Span::styled("You typed", muted_style())))
        .line(Line::from(Span::styled(
            group_thousands(hook.total_words),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )))
        .line(Line::from(Span::styled("words", muted_style())))
        .spacer(1)
        .paragraph(
            &format!("That's {} worth of typing", hook.novel_comparison),
            Style::default(),
        )
        .spacer(1)
        .paragraph(
            &format!(
                "{} hours at the keyboard",
                group_thousands(hook.total_time_hours.round() as u64)
            ),
            muted_style(),
        )
        .spacer(2)
        .paragraph("Use arrows, the wheel or drag to explore", Style::default().fg(FAINT));
    content
}
