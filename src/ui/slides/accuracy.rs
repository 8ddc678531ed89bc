use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::payload::{ClutchFactor, StatisticsPayload};
use crate::ui::charting::format_label;
use crate::ui::section::{muted_style, PieSlice, Section, SlideContent, GOLD, MUTED};
use crate::util::group_thousands;

const CLUTCH_THRESHOLD: f64 = 95.0;

/// Verdict on how precision holds up in the fastest tests.
pub fn clutch_message(clutch: &ClutchFactor) -> &'static str {
    if clutch.fast_tests_accuracy > CLUTCH_THRESHOLD {
        "You stay precise even under pressure!"
    } else {
        "Room to improve accuracy at high speeds"
    }
}

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let accuracy = &data.accuracy;
    let breakdown = &accuracy.error_breakdown;
    let clutch = &accuracy.clutch_factor;

    let mut content = SlideContent::new(width);
    content
        .spacer(1)
        .heading("Accuracy Deep Dive", Some("The Cost of Perfection"))
        .spacer(1)
        .line(Line::from(Span::styled("Overall Accuracy", muted_style())))
        .line(Line::from(Span::styled(
            format!("{}%", format_label(accuracy.overall_accuracy)),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )))
        .paragraph(
            &format!("{} errors this year", group_thousands(accuracy.total_errors)),
            muted_style(),
        )
        .spacer(1)
        .paragraph("Error Type Breakdown", muted_style())
        .spacer(1)
        .push(Section::PieBar(vec![
            PieSlice {
                label: format!("Wrong Key ({})", group_thousands(breakdown.wrong_key.count)),
                percentage: breakdown.wrong_key.pct,
                color: Color::Rgb(239, 68, 68),
            },
            PieSlice {
                label: format!("Extra Chars ({})", group_thousands(breakdown.extra_chars.count)),
                percentage: breakdown.extra_chars.pct,
                color: Color::Rgb(249, 115, 22),
            },
            PieSlice {
                label: format!("Missed Chars ({})", group_thousands(breakdown.missed_chars.count)),
                percentage: breakdown.missed_chars.pct,
                color: Color::Rgb(234, 179, 8),
            },
        ]))
        .spacer(1)
        .push(Section::Meter {
            label: "When Typing Fast".into(),
            caption: format!("{}%", format_label(clutch.fast_tests_accuracy)),
            ratio: clutch.fast_tests_accuracy / 100.0,
            color: GOLD,
        })
        .push(Section::Meter {
            label: "When Typing Slow".into(),
            caption: format!("{}%", format_label(clutch.slow_tests_accuracy)),
            ratio: clutch.slow_tests_accuracy / 100.0,
            color: MUTED,
        })
        .spacer(1)
        .paragraph(clutch_message(clutch), Style::default().fg(GOLD));
    content
}
