use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::payload::{PersonaKind, StatisticsPayload};
use crate::ui::charting::format_label;
use crate::ui::section::{
    bold_style, muted_style, title_style, PieSlice, Section, SlideContent, GOLD,
};

pub fn persona_color(kind: PersonaKind) -> Color {
    match kind {
        PersonaKind::FlowState => Color::Rgb(139, 92, 246),
        PersonaKind::SpeedDemon => Color::Rgb(249, 115, 22),
        PersonaKind::SteadyEddie => Color::Rgb(59, 130, 246),
        PersonaKind::WarmUpMode => Color::Rgb(236, 72, 153),
        PersonaKind::BalancedPerformer => Color::Rgb(16, 185, 129),
        PersonaKind::Unrecognized => GOLD,
    }
}

pub fn build(data: &StatisticsPayload, width: u16) -> SlideContent {
    let dominant = &data.persona.dominant_persona;
    let slices: Vec<PieSlice> = data
        .persona
        .all_personas
        .iter()
        .map(|p| PieSlice {
            label: format!("{} {}", p.kind.icon(), p.name),
            percentage: p.percentage,
            color: persona_color(p.kind),
        })
        .collect();

    let mut content = SlideContent::new(width);
    content
        .spacer(1)
        .heading("Your Typing Persona", None)
        .spacer(1)
        .line(Line::from(Span::styled("You're a", muted_style())))
        .line(Line::from(vec![
            Span::raw(format!("{} ", dominant.kind.icon())),
            Span::styled(
                dominant.name.clone(),
                title_style().fg(persona_color(dominant.kind)),
            ),
        ]))
        .paragraph(&dominant.description, Style::default())
        .paragraph(
            &format!("{}% of your tests", format_label(dominant.percentage)),
            muted_style(),
        );
    if !slices.is_empty() {
        content
            .spacer(1)
            .paragraph("Your Persona Mix", muted_style())
            .spacer(1)
            .push(Section::PieBar(slices));
    }
    if !data.persona.all_personas.is_empty() {
        let lines: Vec<Line<'static>> = data
            .persona
            .all_personas
            .iter()
            .map(|p| {
                Line::from(vec![
                    Span::styled(format!("{:<20}", p.name), bold_style()),
                    Span::styled(
                        format!(
                            "{} WPM · {}% acc · {} consistency",
                            format_label(p.avg_wpm),
                            format_label(p.avg_accuracy),
                            format_label(p.avg_consistency)
                        ),
                        muted_style(),
                    ),
                ])
            })
            .collect();
        content.spacer(1).push(Section::Text(lines));
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::slides::demo;

    #[test]
    fn dominant_persona_is_named() {
        let text = build(&demo(), 80).plain_text();
        assert!(text.contains("Flow State"));
        assert!(text.contains("34% of your tests"));
    }

    #[test]
    fn pie_slices_follow_personas() {
        let content = build(&demo(), 80);
        let slices = content
            .sections()
            .iter()
            .find_map(|s| match s {
                Section::PieBar(slices) => Some(slices.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(slices.len(), 5);
        assert_eq!(slices[1].color, persona_color(PersonaKind::SpeedDemon));
        let total: f64 = slices.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_persona_gets_fallback_color() {
        assert_eq!(persona_color(PersonaKind::Unrecognized), GOLD);
    }
}
