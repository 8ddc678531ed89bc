//! Building blocks for slide bodies.
//!
//! A slide is a vertical stack of [`Section`]s whose heights are known from
//! the width alone, so the visible slide's scroll extent can be computed
//! without drawing it.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, Gauge, GraphType, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::geometry::pie_segments;

const GOLD_RGB: (u8, u8, u8) = (212, 168, 85);
const BACKGROUND_RGB: (u8, u8, u8) = (10, 9, 8);

pub const GOLD: Color = Color::Rgb(GOLD_RGB.0, GOLD_RGB.1, GOLD_RGB.2);
pub const BACKGROUND: Color = Color::Rgb(BACKGROUND_RGB.0, BACKGROUND_RGB.1, BACKGROUND_RGB.2);
pub const MUTED: Color = Color::Gray;
pub const FAINT: Color = Color::DarkGray;

const STAT_CARD_WIDTH: u16 = 22;
const STAT_CARD_HEIGHT: u16 = 3;
const HEAT_ROW_HEIGHT: u16 = 2;
const ROW_LABEL_MAX: usize = 18;

pub fn title_style() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Gold at `intensity` (0..=1) over the background, never fully transparent.
pub fn heat_color(intensity: f64) -> Color {
    let alpha = 0.1 + 0.9 * intensity.clamp(0.0, 1.0);
    let mix = |bg: u8, fg: u8| (bg as f64 + (fg as f64 - bg as f64) * alpha).round() as u8;
    Color::Rgb(
        mix(BACKGROUND_RGB.0, GOLD_RGB.0),
        mix(BACKGROUND_RGB.1, GOLD_RGB.1),
        mix(BACKGROUND_RGB.2, GOLD_RGB.2),
    )
}

/// Greedy word wrap on display width. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.width() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word
                .char_indices()
                .scan(0, |w, (i, c)| {
                    *w += unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
                    Some((i + c.len_utf8(), *w))
                })
                .take_while(|(_, w)| *w <= width)
                .last()
                .map(|(i, _)| i)
                .unwrap_or_else(|| word.chars().next().map_or(word.len(), char::len_utf8));
            let rest = word.split_off(split);
            lines.push(word);
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Debug, Clone)]
pub struct Stat {
    pub value: String,
    pub label: String,
    pub highlight: bool,
}

impl Stat {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            highlight: false,
        }
    }

    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }
}

/// One column of a vertical bar chart, height on a 0..=100 scale.
#[derive(Debug, Clone)]
pub struct BarSpec {
    pub label: String,
    pub height: u64,
    pub text: String,
    pub highlight: bool,
}

/// One row of a horizontal bar list.
#[derive(Debug, Clone)]
pub struct RowBar {
    pub label: String,
    pub ratio: f64,
    pub value: String,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub height: u16,
}

#[derive(Debug, Clone)]
pub struct HeatCell {
    pub label: String,
    pub value: String,
    pub intensity: f64,
}

#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub percentage: f64,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub enum Section {
    Text(Vec<Line<'static>>),
    Spacer(u16),
    Stats(Vec<Stat>),
    Bars { bars: Vec<BarSpec>, height: u16 },
    Rows(Vec<RowBar>),
    Chart(ChartSpec),
    Heatmap { cells: Vec<HeatCell>, columns: usize },
    PieBar(Vec<PieSlice>),
    Meter {
        label: String,
        caption: String,
        ratio: f64,
        color: Color,
    },
}

fn stat_columns(width: u16, count: usize) -> usize {
    ((width / STAT_CARD_WIDTH).max(1) as usize).min(count.max(1))
}

impl Section {
    pub fn height(&self, width: u16) -> u16 {
        match self {
            Section::Text(lines) => lines.len() as u16,
            Section::Spacer(n) => *n,
            Section::Stats(stats) => {
                let columns = stat_columns(width, stats.len());
                (stats.len().div_ceil(columns) as u16) * STAT_CARD_HEIGHT
            }
            Section::Bars { height, .. } => *height,
            Section::Rows(rows) => rows.len() as u16,
            Section::Chart(spec) => spec.height,
            Section::Heatmap { cells, columns } => {
                (cells.len().div_ceil((*columns).max(1)) as u16) * HEAT_ROW_HEIGHT
            }
            Section::PieBar(slices) => 2 + slices.len() as u16,
            Section::Meter { .. } => 2,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match self {
            Section::Text(lines) => {
                Paragraph::new(lines.clone())
                    .alignment(Alignment::Center)
                    .render(area, buf);
            }
            Section::Spacer(_) => {}
            Section::Stats(stats) => render_stats(stats, area, buf),
            Section::Bars { bars, .. } => render_bars(bars, area, buf),
            Section::Rows(rows) => render_rows(rows, area, buf),
            Section::Chart(spec) => render_chart(spec, area, buf),
            Section::Heatmap { cells, columns } => render_heatmap(cells, *columns, area, buf),
            Section::PieBar(slices) => render_pie_bar(slices, area, buf),
            Section::Meter {
                label,
                caption,
                ratio,
                color,
            } => {
                buf.set_stringn(area.x, area.y, label, area.width as usize, muted_style());
                let caption_x = area.right().saturating_sub(caption.width() as u16);
                buf.set_string(caption_x, area.y, caption, Style::default().fg(*color));
                if area.height > 1 {
                    Gauge::default()
                        .gauge_style(Style::default().fg(*color).bg(FAINT))
                        .ratio(ratio.clamp(0.0, 1.0))
                        .label("")
                        .render(Rect::new(area.x, area.y + 1, area.width, 1), buf);
                }
            }
        }
    }
}

fn centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let w = (text.width() as u16).min(area.width);
    let x = area.x + (area.width - w) / 2;
    buf.set_stringn(x, y, text, area.width as usize, style);
}

fn render_stats(stats: &[Stat], area: Rect, buf: &mut Buffer) {
    let columns = stat_columns(area.width, stats.len());
    let cell_width = area.width / columns as u16;
    for (i, stat) in stats.iter().enumerate() {
        let col = (i % columns) as u16;
        let row = (i / columns) as u16;
        let y = area.y + row * STAT_CARD_HEIGHT;
        if y + 1 >= area.bottom() {
            break;
        }
        let cell = Rect::new(area.x + col * cell_width, y, cell_width, STAT_CARD_HEIGHT);
        let value_style = if stat.highlight {
            title_style()
        } else {
            bold_style()
        };
        centered(buf, cell, y, &stat.value, value_style);
        centered(buf, cell, y + 1, &stat.label, muted_style());
    }
}

fn render_bars(bars: &[BarSpec], area: Rect, buf: &mut Buffer) {
    if bars.is_empty() {
        return;
    }
    let gap = 1u16;
    let bar_width = ((area.width + gap) / bars.len() as u16)
        .saturating_sub(gap)
        .max(1);
    let items: Vec<Bar> = bars
        .iter()
        .map(|b| {
            let color = if b.highlight { GOLD } else { FAINT };
            Bar::default()
                .value(b.height)
                .label(Line::from(b.label.clone()))
                .text_value(b.text.clone())
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();
    BarChart::default()
        .data(BarGroup::default().bars(&items))
        .bar_width(bar_width)
        .bar_gap(gap)
        .max(100)
        .render(area, buf);
}

fn render_rows(rows: &[RowBar], area: Rect, buf: &mut Buffer) {
    let label_width = rows
        .iter()
        .map(|r| r.label.width())
        .max()
        .unwrap_or(0)
        .min(ROW_LABEL_MAX) as u16;
    let value_width = rows.iter().map(|r| r.value.width()).max().unwrap_or(0) as u16;
    let bar_width = area.width.saturating_sub(label_width + value_width + 2);
    for (i, row) in rows.iter().enumerate() {
        let y = area.y + i as u16;
        if y >= area.bottom() {
            break;
        }
        buf.set_stringn(area.x, y, &row.label, label_width as usize, muted_style());
        let filled = (row.ratio.clamp(0.0, 1.0) * bar_width as f64).round() as u16;
        let bar_x = area.x + label_width + 1;
        for dx in 0..bar_width {
            let (symbol, style) = if dx < filled {
                ("█", Style::default().fg(row.color))
            } else {
                ("░", Style::default().fg(FAINT))
            };
            if let Some(cell) = buf.cell_mut((bar_x + dx, y)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        }
        buf.set_string(bar_x + bar_width + 1, y, &row.value, bold_style());
    }
}

fn render_chart(spec: &ChartSpec, area: Rect, buf: &mut Buffer) {
    let axis_style = muted_style();
    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(GOLD))
        .graph_type(GraphType::Line)
        .data(&spec.points)];
    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .bounds(spec.x_bounds)
                .labels(spec.x_labels.iter().map(|l| Span::styled(l.clone(), axis_style))),
        )
        .y_axis(
            Axis::default()
                .bounds(spec.y_bounds)
                .labels(spec.y_labels.iter().map(|l| Span::styled(l.clone(), axis_style))),
        )
        .render(area, buf);
}

fn render_heatmap(cells: &[HeatCell], columns: usize, area: Rect, buf: &mut Buffer) {
    let columns = columns.max(1);
    let cell_width = (area.width / columns as u16).max(1);
    for (i, heat) in cells.iter().enumerate() {
        let col = (i % columns) as u16;
        let row = (i / columns) as u16;
        let y = area.y + row * HEAT_ROW_HEIGHT;
        if y >= area.bottom() {
            break;
        }
        let x = area.x + col * cell_width;
        let block = Rect::new(x, y, cell_width.saturating_sub(1).max(1), 1);
        let color = heat_color(heat.intensity);
        buf.set_style(block, Style::default().bg(color));
        let text_color = if heat.intensity > 0.5 {
            Color::Black
        } else {
            Color::White
        };
        centered(buf, block, y, &heat.value, Style::default().fg(text_color).bg(color));
        if y + 1 < area.bottom() {
            centered(buf, block, y + 1, &heat.label, Style::default().fg(FAINT));
        }
    }
}

fn render_pie_bar(slices: &[PieSlice], area: Rect, buf: &mut Buffer) {
    let percentages: Vec<f64> = slices.iter().map(|s| s.percentage).collect();
    let segments = pie_segments(&percentages);
    for dx in 0..area.width {
        let f = (dx as f64 + 0.5) / area.width as f64;
        let hit = segments
            .iter()
            .position(|s| f >= s.start_fraction() && f < s.end_fraction());
        let (symbol, style) = match hit {
            Some(i) => ("█", Style::default().fg(slices[i].color)),
            None => ("░", Style::default().fg(FAINT)),
        };
        if let Some(cell) = buf.cell_mut((area.x + dx, area.y)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }
    for (i, slice) in slices.iter().enumerate() {
        let y = area.y + 2 + i as u16;
        if y >= area.bottom() {
            break;
        }
        let line = Line::from(vec![
            Span::styled("■ ", Style::default().fg(slice.color)),
            Span::styled(slice.label.clone(), bold_style()),
            Span::styled(format!("  {:.1}%", slice.percentage), muted_style()),
        ]);
        buf.set_line(area.x, y, &line, area.width);
    }
}

/// The ordered body of one slide, laid out for a fixed width.
#[derive(Debug, Clone)]
pub struct SlideContent {
    width: u16,
    sections: Vec<Section>,
}

impl SlideContent {
    pub fn new(width: u16) -> Self {
        Self {
            width,
            sections: Vec::new(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn push(&mut self, section: Section) -> &mut Self {
        self.sections.push(section);
        self
    }

    pub fn spacer(&mut self, rows: u16) -> &mut Self {
        self.push(Section::Spacer(rows))
    }

    /// Gold title with an optional muted subtitle underneath.
    pub fn heading(&mut self, title: &str, subtitle: Option<&str>) -> &mut Self {
        let mut lines: Vec<Line<'static>> = wrap(title, self.width as usize)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, title_style())))
            .collect();
        if let Some(sub) = subtitle {
            lines.extend(
                wrap(sub, self.width as usize)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, muted_style()))),
            );
        }
        self.push(Section::Text(lines))
    }

    pub fn paragraph(&mut self, text: &str, style: Style) -> &mut Self {
        let lines = wrap(text, self.width as usize)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, style)))
            .collect();
        self.push(Section::Text(lines))
    }

    pub fn line(&mut self, line: Line<'static>) -> &mut Self {
        self.push(Section::Text(vec![line]))
    }

    pub fn height(&self) -> u16 {
        self.sections
            .iter()
            .map(|s| s.height(self.width))
            .fold(0u16, u16::saturating_add)
    }

    /// Draw the whole content into its own buffer, one row per content line.
    pub fn render_to_buffer(&self) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, self.width, self.height()));
        let mut y = 0u16;
        for section in &self.sections {
            let h = section.height(self.width);
            section.render(Rect::new(0, y, self.width, h), &mut buf);
            y = y.saturating_add(h);
        }
        buf
    }

    /// All rendered text, row by row; handy for assertions.
    pub fn plain_text(&self) -> String {
        let buf = self.render_to_buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                if let Some(cell) = buf.cell((x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap("", 10), Vec::<String>::new());
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn heat_color_spans_background_to_gold() {
        assert_eq!(heat_color(1.0), GOLD);
        assert_ne!(heat_color(0.0), GOLD);
    }

    #[test]
    fn content_height_sums_sections() {
        let mut content = SlideContent::new(44);
        content
            .spacer(2)
            .heading("Your Journey", Some("From where you started"))
            .push(Section::Stats(vec![
                Stat::new("1", "a"),
                Stat::new("2", "b"),
                Stat::new("3", "c"),
            ]))
            .push(Section::Meter {
                label: "x".into(),
                caption: "y".into(),
                ratio: 0.5,
                color: GOLD,
            });
        // 2 + 2 + two rows of two cards + 2
        assert_eq!(content.height(), 2 + 2 + 6 + 2);
    }

    #[test]
    fn heatmap_height_counts_rows() {
        let cells = (0..24)
            .map(|h| HeatCell {
                label: h.to_string(),
                value: String::new(),
                intensity: 0.5,
            })
            .collect();
        let section = Section::Heatmap { cells, columns: 12 };
        assert_eq!(section.height(80), 4);
    }

    #[test]
    fn rendered_text_contains_stats() {
        let mut content = SlideContent::new(60);
        content.push(Section::Stats(vec![Stat::new("1,234", "Tests Completed")]));
        let text = content.plain_text();
        assert!(text.contains("1,234"));
        assert!(text.contains("Tests Completed"));
    }

    #[test]
    fn pie_bar_legend_lists_slices() {
        let mut content = SlideContent::new(40);
        content.push(Section::PieBar(vec![
            PieSlice {
                label: "Flow State".into(),
                percentage: 60.0,
                color: GOLD,
            },
            PieSlice {
                label: "Speed Demon".into(),
                percentage: 40.0,
                color: Color::Red,
            },
        ]));
        let text = content.plain_text();
        assert!(text.contains("Flow State  60.0%"));
        assert!(text.contains("Speed Demon  40.0%"));
    }
}
