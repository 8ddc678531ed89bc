use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Gauge, Paragraph, Widget},
};

use crate::shell::ProcessingStage;
use crate::ui::render_particles;
use crate::ui::section::{muted_style, title_style, FAINT, GOLD};

const GAUGE_WIDTH: u16 = 48;

pub fn render_processing(stage: &ProcessingStage, area: Rect, buf: &mut Buffer) {
    render_particles(&stage.particles, area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(1), // message
            Constraint::Length(1),
            Constraint::Length(1), // gauge
            Constraint::Length(1), // percent
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled("Analyzing your year", title_style()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    Paragraph::new(Span::styled(
        stage.progress.message(),
        muted_style().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    let width = area.width.saturating_sub(4).min(GAUGE_WIDTH);
    let gauge_area = Rect::new(
        chunks[5].x + (chunks[5].width - width) / 2,
        chunks[5].y,
        width,
        chunks[5].height,
    );
    Gauge::default()
        .gauge_style(Style::default().fg(GOLD).bg(FAINT))
        .ratio(stage.progress.percent() as f64 / 100.0)
        .label("")
        .use_unicode(true)
        .render(gauge_area, buf);

    Paragraph::new(Span::styled(
        format!("{}%", stage.progress.percent()),
        Style::default().fg(GOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);
}
