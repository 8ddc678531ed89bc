//! Top-level application state: the shell plus everything that talks to the
//! outside world (analysis worker, browser, export directory).

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};
use webbrowser::Browser;

use crate::analysis::{spawn_analysis, Analyzer};
use crate::config::Config;
use crate::error::UploadError;
use crate::runtime::AppEvent;
use crate::share::{export_card, tweet_url};
use crate::shell::{Shell, ShellCommand, ShellState};
use crate::slides::SlideKind;

pub struct App {
    pub shell: Shell,
    analyzer: Arc<dyn Analyzer>,
    tx: Sender<AppEvent>,
    export_dir: PathBuf,
    now: Instant,
    status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        analyzer: Arc<dyn Analyzer>,
        tx: Sender<AppEvent>,
        area: Rect,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            shell: Shell::new(config, area),
            analyzer,
            tx,
            export_dir,
            now: Instant::now(),
            status: None,
            should_quit: false,
        }
    }

    pub fn state(&self) -> ShellState {
        self.shell.state()
    }

    /// Clock of the last handled event; rendering samples animations here.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Feedback line for share actions.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn select_file(&mut self, path: &Path, now: Instant) -> Result<(), UploadError> {
        self.now = now;
        self.shell.select_file(path, now)
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        self.now = now;
        match event {
            AppEvent::Key(key) => self.on_key(key, now),
            AppEvent::Mouse(mouse) => self.shell.on_mouse(mouse, now),
            AppEvent::Paste(text) => self.shell.on_paste(&text, now),
            AppEvent::Resize(width, height) => {
                debug!(width, height, "resize");
                self.shell.resize(Rect::new(0, 0, width, height));
            }
            AppEvent::Tick => {
                if let Some(command) = self.shell.on_tick(now) {
                    self.run(command);
                }
            }
            AppEvent::Analysis { request, result } => {
                self.shell.on_analysis_result(request, result, now)
            }
        }
    }

    fn run(&mut self, command: ShellCommand) {
        match command {
            ShellCommand::StartAnalysis { request, file } => {
                spawn_analysis(self.analyzer.clone(), request, file, self.tx.clone());
            }
        }
    }

    fn on_summary(&self) -> bool {
        self.shell
            .experience()
            .is_some_and(|exp| exp.current_slide() == SlideKind::Summary)
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            // home takes free text, so letters only act as commands later on
            _ if self.state() == ShellState::Home => self.shell.on_key(key, now),
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('t') if self.on_summary() => self.tweet(),
            KeyCode::Char('e') if self.on_summary() => self.export(),
            _ => self.shell.on_key(key, now),
        }
    }

    fn tweet(&mut self) {
        let Some(payload) = self.shell.wrapped_data() else {
            return;
        };
        let url = match tweet_url(payload) {
            Ok(url) => url,
            Err(e) => {
                warn!("could not build share link: {e}");
                self.status = Some("Could not build the share link".into());
                return;
            }
        };
        if Browser::is_available() {
            match webbrowser::open(url.as_str()) {
                Ok(()) => self.status = Some("Opened X in your browser".into()),
                Err(e) => {
                    warn!("could not open browser: {e}");
                    self.status = Some("Could not open a browser".into());
                }
            }
        } else {
            info!(%url, "no browser available");
            self.status = Some("No browser available".into());
        }
    }

    fn export(&mut self) {
        let Some(payload) = self.shell.wrapped_data() else {
            return;
        };
        match export_card(payload, &self.export_dir, Local::now()) {
            Ok(path) => self.status = Some(format!("Card saved to {}", path.display())),
            Err(e) => {
                warn!(dir = %self.export_dir.display(), "card export failed: {e}");
                self.status = Some(format!("Export failed: {e}"));
            }
        }
    }
}
