use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::{Clear, Paragraph, Widget},
};

use crate::app::App;
use crate::shell::{ShellState, Stage};
use crate::ui::home::render_home;
use crate::ui::processing::render_processing;
use crate::ui::section::GOLD;
use crate::ui::wrapped::{render_wrapped, WrappedLayout};

/// A UI Screen boundary: one per shell state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Home screen - instructions and file intake
pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if let Stage::Home(home) = app.shell.stage() {
            render_home(home, area, buf);
        }
    }
}

/// Processing screen - progress while the analysis runs
pub struct ProcessingScreen;

impl Screen for ProcessingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if let Stage::Processing(processing) = app.shell.stage() {
            render_processing(processing, area, buf);
        }
    }
}

/// Wrapped screen - the slide deck, plus share feedback over the hint row
pub struct WrappedScreen;

impl Screen for WrappedScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let Stage::Wrapped(wrapped) = app.shell.stage() else {
            return;
        };
        render_wrapped(&wrapped.experience, &wrapped.payload, app.now(), area, buf);
        if let Some(status) = app.status() {
            let hint = WrappedLayout::new(area).hint;
            Clear.render(hint, buf);
            Paragraph::new(Span::styled(status.to_string(), Style::default().fg(GOLD)))
                .alignment(Alignment::Center)
                .render(hint, buf);
        }
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: ShellState) -> Box<dyn Screen> {
    match state {
        ShellState::Home => Box::new(HomeScreen),
        ShellState::Processing => Box::new(ProcessingScreen),
        ShellState::Wrapped => Box::new(WrappedScreen),
    }
}
