//! Home screen: how to get an export, and where to put it.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::shell::HomeStage;
use crate::ui::section::{bold_style, muted_style, title_style, FAINT, GOLD};

const MAX_WIDTH: u16 = 72;

const STEPS: [(&str, &str); 3] = [
    ("Go to Monkeytype", "Visit your profile page on monkeytype.com"),
    ("Export your data", "Download your typing history as a CSV file"),
    ("Upload it here", "Drop your CSV to generate your Wrapped"),
];

/// The end of `text` that fits in `width` columns.
fn tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            break;
        }
        start = i;
    }
    &text[start..]
}

fn render_steps(area: Rect, buf: &mut Buffer) {
    for (i, (title, description)) in STEPS.iter().enumerate() {
        let y = area.y + i as u16;
        if y >= area.bottom() {
            break;
        }
        let mut spans = vec![
            Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::Black).bg(GOLD)),
            Span::raw("  "),
            Span::styled(*title, bold_style()),
        ];
        let used = 6 + title.width() + 3;
        if (area.width as usize) > used + 10 {
            spans.push(Span::styled(format!("   {description}"), muted_style()));
        }
        buf.set_line(area.x, y, &Line::from(spans), area.width);
    }
}

fn render_input(home: &HomeStage, area: Rect, buf: &mut Buffer) {
    let accepted = home.accepted.is_some();
    let border = if accepted {
        Style::default().fg(Color::Green)
    } else if home.notice.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(GOLD)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" CSV export ");
    let inner = block.inner(area);
    block.render(area, buf);

    let line = if home.path_input.is_empty() {
        Line::from(vec![
            Span::styled("█", Style::default().fg(GOLD)),
            Span::styled(" drag & drop your CSV here, or type its path", Style::default().fg(FAINT)),
        ])
    } else {
        let visible = tail(&home.path_input, inner.width.saturating_sub(1) as usize);
        Line::from(vec![
            Span::raw(visible.to_string()),
            Span::styled("█", Style::default().fg(GOLD).add_modifier(Modifier::SLOW_BLINK)),
        ])
    };
    buf.set_line(inner.x, inner.y, &line, inner.width);
}

fn status_line(home: &HomeStage) -> Line<'static> {
    if let Some((file, _)) = &home.accepted {
        Line::from(vec![
            Span::styled(
                "✓ CSV Detected! ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} · Processing your typing data...", file.name),
                muted_style(),
            ),
        ])
    } else if let Some(notice) = &home.notice {
        Line::from(Span::styled(
            format!("✗ {notice}"),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            "Your terminal pastes the path when you drop a file on this window",
            Style::default().fg(FAINT),
        ))
    }
}

pub fn render_home(home: &HomeStage, area: Rect, buf: &mut Buffer) {
    let width = area.width.saturating_sub(4).min(MAX_WIDTH);
    let column = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // title
            Constraint::Length(1), // tagline
            Constraint::Length(1),
            Constraint::Length(3), // steps
            Constraint::Length(1),
            Constraint::Length(3), // input
            Constraint::Length(2), // status
            Constraint::Length(1), // keys
            Constraint::Min(0),
        ])
        .split(column);

    Paragraph::new(Span::styled("⌨  typewrapped", title_style()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    Paragraph::new(Span::styled("Your year of typing, wrapped.", muted_style()))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    render_steps(chunks[4], buf);
    render_input(home, chunks[6], buf);

    Paragraph::new(status_line(home))
        .wrap(Wrap { trim: true })
        .render(chunks[7], buf);
    Paragraph::new(Span::styled(
        "enter upload   esc quit",
        Style::default().fg(FAINT),
    ))
    .alignment(Alignment::Center)
    .render(chunks[8], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::UploadedFile;
    use std::path::PathBuf;
    use std::time::Instant;

    fn text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn render(home: &HomeStage, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        render_home(home, area, &mut buffer);
        buffer
    }

    #[test]
    fn shows_steps_and_placeholder() {
        let content = text(&render(&HomeStage::default(), 100, 24));
        assert!(content.contains("typewrapped"));
        assert!(content.contains("Go to Monkeytype"));
        assert!(content.contains("Export your data"));
        assert!(content.contains("Upload it here"));
        assert!(content.contains("drag & drop your CSV here"));
    }

    #[test]
    fn shows_notice_and_acknowledgment() {
        let home = HomeStage {
            notice: Some("Please upload a CSV file (got data.txt)".into()),
            ..HomeStage::default()
        };
        assert!(text(&render(&home, 100, 24)).contains("Please upload a CSV file"));

        let home = HomeStage {
            path_input: "/tmp/results.csv".into(),
            notice: None,
            accepted: Some((
                UploadedFile {
                    path: PathBuf::from("/tmp/results.csv"),
                    name: "results.csv".into(),
                },
                Instant::now(),
            )),
        };
        let content = text(&render(&home, 100, 24));
        assert!(content.contains("CSV Detected!"));
        assert!(content.contains("/tmp/results.csv"));
    }

    #[test]
    fn long_paths_keep_their_end_visible() {
        assert_eq!(tail("/a/very/long/path/results.csv", 11), "results.csv");
        assert_eq!(tail("short", 10), "short");
        let home = HomeStage {
            path_input: format!("/{}/results.csv", "deep".repeat(40)),
            ..HomeStage::default()
        };
        assert!(text(&render(&home, 60, 24)).contains("results.csv█"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        render(&HomeStage::default(), 3, 2);
        render(&HomeStage::default(), 0, 0);
    }
}
