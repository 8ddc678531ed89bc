//! The slide deck screen: header, progress bar, slide rail, the visible
//! slide and the previous/next buttons.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::payload::StatisticsPayload;
use crate::slides::{Axis, SLIDES};
use crate::ui::section::{bold_style, muted_style, title_style, FAINT, GOLD};
use crate::ui::{render_particles, slides};
use crate::wrapped::WrappedExperience;

const HORIZONTAL_MARGIN: u16 = 2;
const RAIL_WIDTH: u16 = 20;
const MIN_WIDTH_FOR_RAIL: u16 = 70;
const MAX_CONTENT_WIDTH: u16 = 84;

pub const PREV_LABEL: &str = "◀ Prev";
pub const NEXT_LABEL: &str = "Next ▶";

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Rail(usize),
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrappedLayout {
    pub header: Rect,
    pub progress: Rect,
    pub rail: Option<Rect>,
    pub slide: Rect,
    pub hint: Rect,
    pub prev: Rect,
    pub next: Rect,
}

fn inside(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.right() && row >= r.y && row < r.bottom()
}

impl WrappedLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(1), // progress
                Constraint::Length(1),
                Constraint::Min(1), // body
                Constraint::Length(1), // hint
                Constraint::Length(1), // buttons
            ])
            .split(area);

        let body = chunks[3];
        let (rail, stage) = if body.width >= MIN_WIDTH_FOR_RAIL {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(RAIL_WIDTH), Constraint::Min(1)])
                .split(body);
            (Some(cols[0]), cols[1])
        } else {
            (None, body)
        };

        let slide_width = stage
            .width
            .saturating_sub(HORIZONTAL_MARGIN * 2)
            .clamp(1, MAX_CONTENT_WIDTH)
            .min(stage.width);
        let slide = Rect::new(
            stage.x + (stage.width - slide_width) / 2,
            stage.y,
            slide_width,
            stage.height,
        );

        let buttons = chunks[5];
        let prev_width = (PREV_LABEL.width() as u16).min(buttons.width);
        let next_width = (NEXT_LABEL.width() as u16).min(buttons.width);
        let prev = Rect::new(
            buttons.x + HORIZONTAL_MARGIN.min(buttons.width.saturating_sub(prev_width)),
            buttons.y,
            prev_width,
            buttons.height,
        );
        let next = Rect::new(
            buttons
                .right()
                .saturating_sub(HORIZONTAL_MARGIN + next_width)
                .max(buttons.x),
            buttons.y,
            next_width,
            buttons.height,
        );

        Self {
            header: chunks[0],
            progress: chunks[1],
            rail,
            slide,
            hint: chunks[4],
            prev,
            next,
        }
    }

    /// Screen row of rail entry `index`, entries centred vertically.
    pub fn rail_row(&self, index: usize) -> Option<u16> {
        let rail = self.rail?;
        let count = SLIDES.len() as u16;
        if index >= SLIDES.len() || rail.height < count {
            return None;
        }
        Some(rail.y + (rail.height - count) / 2 + index as u16)
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        if inside(self.prev, column, row) {
            return Some(Hit::Previous);
        }
        if inside(self.next, column, row) {
            return Some(Hit::Next);
        }
        let rail = self.rail?;
        if !inside(rail, column, row) {
            return None;
        }
        (0..SLIDES.len()).find(|i| self.rail_row(*i) == Some(row)).map(Hit::Rail)
    }
}

fn render_header(exp: &WrappedExperience, layout: &WrappedLayout, buf: &mut Buffer) {
    let area = layout.header;
    buf.set_line(
        area.x + HORIZONTAL_MARGIN.min(area.width),
        area.y,
        &Line::from(Span::styled("⌨ typewrapped 2025", title_style())),
        area.width.saturating_sub(HORIZONTAL_MARGIN),
    );
    let counter = format!(
        "{:02} / {:02}",
        exp.current_index() + 1,
        exp.nav().slide_count()
    );
    let x = area
        .right()
        .saturating_sub(HORIZONTAL_MARGIN + counter.width() as u16)
        .max(area.x);
    buf.set_string(x, area.y, counter, muted_style());

    let bar = layout.progress;
    let filled = (bar.width as usize * (exp.current_index() + 1) / exp.nav().slide_count().max(1)) as u16;
    for dx in 0..bar.width {
        let style = if dx < filled {
            Style::default().fg(GOLD)
        } else {
            Style::default().fg(FAINT)
        };
        if let Some(cell) = buf.cell_mut((bar.x + dx, bar.y)) {
            cell.set_symbol("━");
            cell.set_style(style);
        }
    }
}

fn render_rail(exp: &WrappedExperience, layout: &WrappedLayout, buf: &mut Buffer) {
    let Some(rail) = layout.rail else {
        return;
    };
    for (i, slide) in SLIDES.iter().enumerate() {
        let Some(y) = layout.rail_row(i) else {
            continue;
        };
        let current = i == exp.current_index();
        let (marker, style) = if current {
            ("●", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        } else {
            ("○", Style::default().fg(FAINT))
        };
        buf.set_stringn(
            rail.x + 1,
            y,
            format!("{marker} {}", slide.label),
            rail.width.saturating_sub(1) as usize,
            style,
        );
    }
}

/// Copy the visible slide's own buffer into the slide area, shifted by the
/// scroll offset and the transition displacement.
fn render_slide(
    exp: &WrappedExperience,
    data: &StatisticsPayload,
    now: Instant,
    layout: &WrappedLayout,
    buf: &mut Buffer,
) {
    let area = layout.slide;
    let index = exp.visible_slide();
    let content = slides::build(SLIDES[index].kind, data, area.width);
    let source = content.render_to_buffer();

    let (dx, dy, dim) = match exp.transition() {
        Some(t) => {
            let (axis, frac) = t.offset(now);
            let dim = t.visibility(now) < 0.5;
            match axis {
                Axis::Horizontal => ((frac * area.width as f64).round() as i32, 0, dim),
                Axis::Vertical => (0, (frac * area.height as f64).round() as i32, dim),
            }
        }
        None => (0, 0, false),
    };
    let scroll = exp.visible_scroll_offset() as i32;

    for row in 0..area.height {
        for col in 0..area.width {
            let sx = col as i32 - dx;
            let sy = row as i32 + scroll - dy;
            if sx < 0 || sy < 0 {
                continue;
            }
            let Some(src) = source.cell((sx as u16, sy as u16)) else {
                continue;
            };
            if let Some(dst) = buf.cell_mut((area.x + col, area.y + row)) {
                *dst = src.clone();
                if dim {
                    dst.modifier.insert(Modifier::DIM);
                }
            }
        }
    }

    if exp.transition().is_none() {
        let metrics = exp.viewport().metrics();
        if !metrics.has_no_scroll() {
            let marker_x = area.right().saturating_sub(1);
            if !metrics.is_at_top() {
                buf.set_string(marker_x, area.y, "↑", Style::default().fg(GOLD));
            }
            if !metrics.is_at_bottom() {
                buf.set_string(
                    marker_x,
                    area.bottom().saturating_sub(1),
                    "↓",
                    Style::default().fg(GOLD),
                );
            }
        }
    }

    if let Some(field) = exp.confetti() {
        render_particles(field, area, buf);
    }
}

fn render_controls(exp: &WrappedExperience, layout: &WrappedLayout, buf: &mut Buffer) {
    let hint = match SLIDES[exp.current_index()].axis {
        Axis::Horizontal => "Swipe left/right",
        Axis::Vertical => "Use arrows or buttons",
    };
    Paragraph::new(Span::styled(hint, Style::default().fg(FAINT)))
        .alignment(Alignment::Center)
        .render(layout.hint, buf);

    let button_style = |enabled: bool| {
        if enabled {
            bold_style()
        } else {
            Style::default().fg(FAINT)
        }
    };
    buf.set_stringn(
        layout.prev.x,
        layout.prev.y,
        PREV_LABEL,
        layout.prev.width as usize,
        button_style(exp.nav().can_go_previous()),
    );
    buf.set_stringn(
        layout.next.x,
        layout.next.y,
        NEXT_LABEL,
        layout.next.width as usize,
        button_style(exp.nav().can_go_next()),
    );

    let quit = "q quit";
    let area = Rect::new(layout.prev.x, layout.prev.y, layout.next.right().saturating_sub(layout.prev.x), 1);
    if area.width as usize > PREV_LABEL.width() + NEXT_LABEL.width() + quit.width() + 2 {
        Paragraph::new(Span::styled(quit, Style::default().fg(FAINT)))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

pub fn render_wrapped(
    exp: &WrappedExperience,
    data: &StatisticsPayload,
    now: Instant,
    area: Rect,
    buf: &mut Buffer,
) {
    let layout = WrappedLayout::new(area);
    render_header(exp, &layout, buf);
    render_rail(exp, &layout, buf);
    render_slide(exp, data, now, &layout, buf);
    render_controls(exp, &layout, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_layout_has_rail_and_buttons() {
        let layout = WrappedLayout::new(Rect::new(0, 0, 120, 40));
        let rail = layout.rail.unwrap();
        assert_eq!(rail.width, RAIL_WIDTH);
        assert_eq!(layout.slide.width, MAX_CONTENT_WIDTH);
        assert_eq!(layout.slide.height, 40 - 5);
        assert_eq!(layout.prev.y, 39);
        assert_eq!(layout.next.right(), 120 - HORIZONTAL_MARGIN);
    }

    #[test]
    fn narrow_layout_drops_rail() {
        let layout = WrappedLayout::new(Rect::new(0, 0, 50, 20));
        assert!(layout.rail.is_none());
        assert_eq!(layout.slide.width, 46);
        assert_eq!(layout.rail_row(0), None);
    }

    #[test]
    fn hits_resolve_rail_and_buttons() {
        let layout = WrappedLayout::new(Rect::new(0, 0, 120, 40));
        let row = layout.rail_row(4).unwrap();
        assert_eq!(layout.hit(3, row), Some(Hit::Rail(4)));
        assert_eq!(layout.hit(layout.prev.x, layout.prev.y), Some(Hit::Previous));
        assert_eq!(layout.hit(layout.next.x + 1, layout.next.y), Some(Hit::Next));
        assert_eq!(layout.hit(60, 10), None);
    }

    #[test]
    fn short_rail_is_not_clickable() {
        let layout = WrappedLayout::new(Rect::new(0, 0, 100, 12));
        assert!(layout.rail.is_some());
        assert_eq!(layout.rail_row(0), None);
        assert_eq!(layout.hit(3, 5), None);
    }
}
