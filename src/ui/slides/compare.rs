use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::payload::StatisticsPayload;
use crate::ui::charting::format_label;
use crate::ui::section::{
    muted_style, title_style, RowBar, Section, SlideContent, Stat, GOLD, MUTED,
};
use crate::util::ratio_of_max;

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let cmp = &data.comparisons;
    let longest = cmp
        .all_novel_comparisons
        .iter()
        .map(|n| n.time_hours)
        .fold(0.0, f64::max);
    let novels: Vec<RowBar> = cmp
        .all_novel_comparisons
        .iter()
        .map(|n| RowBar {
            label: n.title.clone(),
            ratio: ratio_of_max(n.time_hours, longest),
            value: format!("{}h", format_label(n.time_hours)),
            color: if n.title == cmp.featured_novel.title {
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
            "How You Compare",
            Some("Your place in the global typing community"),
        )
        .spacer(1)
        .line(Line::from(vec![
            Span::styled(
                format_label(cmp.global_percentile),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" percentile", muted_style()),
        ]))
        .push(Section::Meter {
            label: "0%".into(),
            caption: "100%".into(),
            ratio: cmp.global_percentile / 100.0,
            color: GOLD,
        })
        .paragraph(
            &format!("Faster than {}% of all typists", format_label(cmp.global_percentile)),
            muted_style(),
        )
        .spacer(1)
        .line(Line::from(vec![
            Span::styled(cmp.skill_tier.clone(), title_style()),
            Span::styled(" tier", muted_style()),
        ]))
        .paragraph(&cmp.tier_description, Style::default())
        .spacer(1)
        .push(Section::Stats(vec![
            Stat::new(format_label(cmp.chars_per_second), "Characters Per Second").highlighted(),
            Stat::new(format!("{}x", format_label(cmp.times_faster_than_avg)), "vs Average"),
            Stat::new(
                format!("{}%", format_label(cmp.percent_of_world_record)),
                "of World Record",
            ),
            Stat::new(format_label(cmp.consistency_score), cmp.consistency_rating.clone()),
        ]))
        .paragraph(
            &format!(
                "{:.0} characters per minute · ±{} WPM spread",
                cmp.chars_per_second * 60.0,
                format_label(cmp.wpm_std_dev)
            ),
            muted_style(),
        )
        .spacer(1)
        .paragraph(&cmp.comparison_message, Style::default());
    if !novels.is_empty() {
        content
            .spacer(1)
            .paragraph("At your speed, you could type", muted_style())
            .push(Section::Rows(novels));
    }
    content
        .spacer(1)
        .paragraph(&format!("Fun Fact: {}", cmp.featured_fact), Style::default().fg(GOLD));
    content
}
