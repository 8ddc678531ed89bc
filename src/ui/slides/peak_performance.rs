use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::payload::StatisticsPayload;
use crate::ui::charting::format_label;
use crate::ui::section::{muted_style, title_style, RowBar, Section, SlideContent, Stat, GOLD};
use crate::util::{group_thousands, ratio_of_max};

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let peak = &data.peak_performance;
    let max_count = peak
        .thresholds
        .iter()
        .map(|t| t.count)
        .max()
        .unwrap_or(0) as f64;
    let rows: Vec<RowBar> = peak
        .thresholds
        .iter()
        .map(|t| RowBar {
            label: format!("{}+ WPM", t.wpm),
            ratio: ratio_of_max(t.count as f64, max_count),
            value: format!("{} ({}%)", group_thousands(t.count as u64), format_label(t.pct)),
            color: GOLD,
        })
        .collect();

    let mut content = SlideContent::new(width);
    content
        .spacer(1)
        .heading("Peak Performance", None)
        .spacer(1)
        .line(Line::from(Span::styled("All-Time Personal Best", muted_style())))
        .line(Line::from(vec![
            Span::styled(
                format_label(peak.all_time_pb),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" WPM", title_style()),
        ]))
        .line(Line::from(Span::styled(peak.pb_date.clone(), muted_style())))
        .spacer(1)
        .push(Section::Stats(vec![
            Stat::new(peak.total_pbs_hit.to_string(), "PBs This Year").highlighted(),
            Stat::new(
                group_thousands(peak.perfect_accuracy_count as u64),
                "tests with 100%",
            ),
            Stat::new(
                format!("{}%", format_label(peak.perfect_accuracy_pct)),
                "Perfect Accuracy",
            ),
        ]));
    if !rows.is_empty() {
        content
            .spacer(1)
            .paragraph("Speed Threshold Breakdown", muted_style())
            .spacer(1)
            .push(Section::Rows(rows));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::slides::demo;

    #[test]
    fn thresholds_scale_to_the_busiest_tier() {
        let content = build(&demo(), 72);
        let rows = content
            .sections()
            .iter()
            .find_map(|s| match s {
                Section::Rows(rows) => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].ratio, 1.0);
        assert!(rows[4].ratio < 0.01);
        assert_eq!(rows[0].label, "100+ WPM");
        assert_eq!(rows[0].value, "1,847 (38.3%)");
    }

    #[test]
    fn shows_personal_best() {
        let text = build(&demo(), 72).plain_text();
        assert!(text.contains("147.3 WPM"));
        assert!(text.contains("October 23, 2024"));
        assert!(text.contains("PBs This Year"));
    }
}
