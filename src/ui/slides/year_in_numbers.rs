use ratatui::style::Style;

use crate::payload::StatisticsPayload;
use crate::ui::section::{Section, SlideContent, Stat};
use crate::util::group_thousands;

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let year = &data.year_in_numbers;
    let mut content = SlideContent::new(width);
    content
        .spacer(1)
        .heading(
            "Your Year in Numbers",
            Some("The stats that define your typing journey"),
        )
        .spacer(1)
        .push(Section::Stats(vec![
            Stat::new(group_thousands(year.total_tests), "Tests Completed").highlighted(),
            Stat::new(year.active_days.to_string(), "Active Days"),
            Stat::new(group_thousands(year.total_characters), "Characters Typed"),
            Stat::new(format!("{} days", year.longest_streak), "Longest Streak"),
        ]))
        .spacer(1)
        .paragraph(
            &format!(
                "{} tests across {} days of practice",
                group_thousands(year.total_tests),
                year.active_days
            ),
            Style::default(),
        );
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::slides::demo;

    #[test]
    fn lists_the_four_counters() {
        let text = build(&demo(), 96).plain_text();
        for needle in ["4,827", "298", "4,236,960", "47 days", "Longest Streak"] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }
}
