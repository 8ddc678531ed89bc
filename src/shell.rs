//! The three-screen flow: home (file intake), processing (waiting on the
//! analysis) and wrapped (the slide deck).
//!
//! Each stage owns exactly the data it needs, so a wrapped deck without a
//! payload or a processing screen without a request cannot be represented.
//! The flow only moves forward, except that a failed analysis returns home.

use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisResult, RequestId};
use crate::config::Config;
use crate::error::UploadError;
use crate::particles::{ParticleField, STEP};
use crate::payload::StatisticsPayload;
use crate::progress::ProgressIndicator;
use crate::upload::{path_from_drop, validate_upload, UploadedFile};
use crate::wrapped::WrappedExperience;

const AMBIENT_PARTICLES: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ShellState {
    Home,
    Processing,
    Wrapped,
}

/// Side effects the shell asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    StartAnalysis {
        request: RequestId,
        file: UploadedFile,
    },
}

#[derive(Debug, Default)]
pub struct HomeStage {
    pub path_input: String,
    pub notice: Option<String>,
    /// Accepted file and the moment processing begins.
    pub accepted: Option<(UploadedFile, Instant)>,
}

pub struct ProcessingStage {
    pub request: RequestId,
    pub started: Instant,
    pub progress: ProgressIndicator,
    pub particles: ParticleField,
    particle_clock: Instant,
    pub result: Option<StatisticsPayload>,
}

impl ProcessingStage {
    pub fn new(request: RequestId, now: Instant, particles: ParticleField) -> Self {
        Self {
            request,
            started: now,
            progress: ProgressIndicator::new(now),
            particles,
            particle_clock: now,
            result: None,
        }
    }
}

pub struct WrappedStage {
    pub payload: StatisticsPayload,
    pub experience: WrappedExperience,
}

pub enum Stage {
    Home(HomeStage),
    Processing(ProcessingStage),
    Wrapped(Box<WrappedStage>),
}

pub struct Shell {
    stage: Stage,
    config: Config,
    area: Rect,
    uploaded_file: Option<UploadedFile>,
    last_request: RequestId,
}

impl Shell {
    pub fn new(config: &Config, area: Rect) -> Self {
        Self {
            stage: Stage::Home(HomeStage::default()),
            config: config.clone(),
            area,
            uploaded_file: None,
            last_request: RequestId::default(),
        }
    }

    pub fn state(&self) -> ShellState {
        match self.stage {
            Stage::Home(_) => ShellState::Home,
            Stage::Processing(_) => ShellState::Processing,
            Stage::Wrapped(_) => ShellState::Wrapped,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn uploaded_file(&self) -> Option<&UploadedFile> {
        self.uploaded_file.as_ref()
    }

    pub fn wrapped_data(&self) -> Option<&StatisticsPayload> {
        match &self.stage {
            Stage::Wrapped(w) => Some(&w.payload),
            _ => None,
        }
    }

    pub fn experience(&self) -> Option<&WrappedExperience> {
        match &self.stage {
            Stage::Wrapped(w) => Some(&w.experience),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match &self.stage {
            Stage::Home(home) => home.notice.as_deref(),
            _ => None,
        }
    }

    pub fn current_request(&self) -> Option<RequestId> {
        match &self.stage {
            Stage::Processing(p) => Some(p.request),
            _ => None,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        match &mut self.stage {
            Stage::Processing(p) => {
                p.particles = ParticleField::ambient(area.width, area.height, AMBIENT_PARTICLES);
            }
            Stage::Wrapped(w) => w.experience.resize(area, &w.payload),
            Stage::Home(_) => {}
        }
    }

    /// Validate a selected file. Accepted files move on to processing after
    /// the acknowledgment delay; rejections stay on the home screen.
    pub fn select_file(&mut self, path: &Path, now: Instant) -> Result<(), UploadError> {
        let Stage::Home(home) = &mut self.stage else {
            debug!(path = %path.display(), "file selection outside home ignored");
            return Ok(());
        };
        match validate_upload(path) {
            Ok(file) => {
                info!(file = %file.name, "file accepted");
                home.notice = None;
                home.path_input = path.display().to_string();
                let due = now + Duration::from_millis(self.config.upload_ack_ms);
                home.accepted = Some((file.clone(), due));
                self.uploaded_file = Some(file);
                Ok(())
            }
            Err(err) => {
                info!(path = %path.display(), "file rejected: {err}");
                home.notice = Some(err.to_string());
                home.accepted = None;
                Err(err)
            }
        }
    }

    fn start_processing(&mut self, file: UploadedFile, now: Instant) -> ShellCommand {
        let request = self.last_request.next();
        self.last_request = request;
        info!(%request, file = %file.name, "processing");
        let particles = ParticleField::ambient(self.area.width, self.area.height, AMBIENT_PARTICLES);
        self.stage = Stage::Processing(ProcessingStage::new(request, now, particles));
        ShellCommand::StartAnalysis { request, file }
    }

    fn enter_wrapped(&mut self, payload: StatisticsPayload, now: Instant) {
        info!("wrapped");
        let experience = WrappedExperience::new(&self.config, self.area, &payload, now);
        self.stage = Stage::Wrapped(Box::new(WrappedStage {
            payload,
            experience,
        }));
    }

    fn min_processing(&self) -> Duration {
        Duration::from_millis(self.config.min_processing_ms)
    }

    pub fn on_tick(&mut self, now: Instant) -> Option<ShellCommand> {
        let min_processing = self.min_processing();
        match &mut self.stage {
            Stage::Home(home) => {
                let due = matches!(&home.accepted, Some((_, at)) if now >= *at);
                if !due {
                    return None;
                }
                let (file, _) = home.accepted.take()?;
                Some(self.start_processing(file, now))
            }
            Stage::Processing(p) => {
                p.progress.tick(now);
                let step = Duration::from_secs_f64(STEP);
                while now.saturating_duration_since(p.particle_clock) >= step {
                    p.particles.update();
                    p.particle_clock += step;
                }
                if now.saturating_duration_since(p.started) >= min_processing {
                    if let Some(payload) = p.result.take() {
                        self.enter_wrapped(payload, now);
                    }
                }
                None
            }
            Stage::Wrapped(w) => {
                w.experience.on_tick(&w.payload, now);
                None
            }
        }
    }

    pub fn on_analysis_result(&mut self, request: RequestId, result: AnalysisResult, now: Instant) {
        let current = self.current_request();
        if current != Some(request) {
            debug!(%request, ?current, "stale analysis result dropped");
            return;
        }
        match result {
            Ok(payload) => {
                let min_processing = self.min_processing();
                let Stage::Processing(p) = &mut self.stage else {
                    return;
                };
                p.progress.complete();
                if now.saturating_duration_since(p.started) >= min_processing {
                    self.enter_wrapped(payload, now);
                } else {
                    info!(%request, "analysis done, holding the processing screen");
                    p.result = Some(payload);
                }
            }
            Err(err) => {
                warn!(%request, "analysis failed, back to home: {err}");
                self.uploaded_file = None;
                self.stage = Stage::Home(HomeStage {
                    notice: Some(err.to_string()),
                    ..HomeStage::default()
                });
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        match &mut self.stage {
            Stage::Home(home) => match key.code {
                KeyCode::Char(c) => {
                    home.path_input.push(c);
                }
                KeyCode::Backspace => {
                    home.path_input.pop();
                }
                KeyCode::Enter => {
                    let path = path_from_drop(&home.path_input);
                    if !path.as_os_str().is_empty() {
                        let _ = self.select_file(&path, now);
                    }
                }
                _ => {}
            },
            Stage::Processing(_) => {}
            Stage::Wrapped(w) => w.experience.on_key(key.code, &w.payload, now),
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let Stage::Wrapped(w) = &mut self.stage else {
            return;
        };
        let WrappedStage {
            payload,
            experience,
        } = w.as_mut();
        match mouse.kind {
            MouseEventKind::ScrollDown => experience.on_wheel(true, payload, now),
            MouseEventKind::ScrollUp => experience.on_wheel(false, payload, now),
            MouseEventKind::Down(MouseButton::Left) => {
                experience.on_mouse_down(mouse.column, mouse.row)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                experience.on_mouse_up(mouse.column, mouse.row, payload, now)
            }
            _ => {}
        }
    }

    /// A paste on the home screen is a dropped file.
    pub fn on_paste(&mut self, text: &str, now: Instant) {
        if self.state() != ShellState::Home {
            return;
        }
        let path = path_from_drop(text);
        let _ = self.select_file(&path, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn demo() -> StatisticsPayload {
        StatisticsPayload::from_json(crate::demo::payload_bytes()).unwrap()
    }

    fn shell() -> Shell {
        Shell::new(&Config::default(), Rect::new(0, 0, 100, 30))
    }

    fn export(dir: &TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, crate::demo::sample_export()).unwrap();
        path
    }

    fn start(shell: &mut Shell, dir: &TempDir, t0: Instant) -> RequestId {
        shell.select_file(&export(dir, "data.csv"), t0).unwrap();
        match shell.on_tick(t0 + Duration::from_millis(800)) {
            Some(ShellCommand::StartAnalysis { request, .. }) => request,
            None => panic!("expected analysis to start"),
        }
    }

    #[test]
    fn non_csv_is_rejected_inline() {
        let dir = tempdir().unwrap();
        let mut shell = shell();
        let t0 = Instant::now();
        assert_matches!(
            shell.select_file(&export(&dir, "data.txt"), t0),
            Err(UploadError::UnsupportedExtension { .. })
        );
        assert_eq!(shell.state(), ShellState::Home);
        assert!(shell.notice().unwrap().starts_with("Please upload a CSV file"));
        assert_eq!(shell.on_tick(t0 + Duration::from_secs(5)), None);
        assert_eq!(shell.state(), ShellState::Home);
    }

    #[test]
    fn csv_moves_to_processing_after_acknowledgment() {
        let dir = tempdir().unwrap();
        let mut shell = shell();
        let t0 = Instant::now();
        shell.select_file(&export(&dir, "data.csv"), t0).unwrap();
        assert_eq!(shell.uploaded_file().unwrap().name, "data.csv");

        assert_eq!(shell.on_tick(t0 + Duration::from_millis(799)), None);
        assert_eq!(shell.state(), ShellState::Home);
        assert_matches!(
            shell.on_tick(t0 + Duration::from_millis(800)),
            Some(ShellCommand::StartAnalysis { request: RequestId(1), ref file }) if file.name == "data.csv"
        );
        assert_eq!(shell.state(), ShellState::Processing);
    }

    #[test]
    fn result_waits_for_minimum_display_time() {
        let dir = tempdir().unwrap();
        let mut shell = shell();
        let t0 = Instant::now();
        let request = start(&mut shell, &dir, t0);
        let started = t0 + Duration::from_millis(800);

        shell.on_analysis_result(request, Ok(demo()), started + Duration::from_millis(100));
        assert_eq!(shell.state(), ShellState::Processing);
        shell.on_tick(started + Duration::from_millis(1499));
        assert_eq!(shell.state(), ShellState::Processing);
        shell.on_tick(started + Duration::from_millis(1500));
        assert_eq!(shell.state(), ShellState::Wrapped);
        assert!(shell.wrapped_data().is_some());
        assert_eq!(shell.experience().unwrap().current_index(), 0);
    }

    #[test]
    fn late_result_enters_wrapped_at_once() {
        let dir = tempdir().unwrap();
        let mut shell = shell();
        let t0 = Instant::now();
        let request = start(&mut shell, &dir, t0);
        shell.on_analysis_result(request, Ok(demo()), t0 + Duration::from_secs(10));
        assert_eq!(shell.state(), ShellState::Wrapped);
    }

    #[test]
    fn failure_returns_home_and_clears_state() {
        let dir = tempdir().unwrap();
        let mut shell = shell();
        let t0 = Instant::now();
        let request = start(&mut shell, &dir, t0);

        let err = AnalysisError::Rejected {
            status: 400,
            detail: "Missing required columns: wpm".into(),
        };
        shell.on_analysis_result(request, Err(err), t0 + Duration::from_secs(1));
        assert_eq!(shell.state(), ShellState::Home);
        assert!(shell.uploaded_file().is_none());
        assert!(shell.wrapped_data().is_none());
        assert_eq!(shell.notice(), Some("Missing required columns: wpm"));

        // a following valid upload goes through with a fresh request id
        let t1 = t0 + Duration::from_secs(2);
        shell.select_file(&export(&dir, "again.csv"), t1).unwrap();
        assert_eq!(shell.notice(), None);
        assert_matches!(
            shell.on_tick(t1 + Duration::from_millis(800)),
            Some(ShellCommand::StartAnalysis { request: RequestId(2), .. })
        );
        shell.on_analysis_result(RequestId(2), Ok(demo()), t1 + Duration::from_secs(5));
        assert_eq!(shell.state(), ShellState::Wrapped);
    }

    #[test]
    fn stale_result_is_ignored() {
        let dir = tempdir().unwrap();
        let mut shell = shell();
        let t0 = Instant::now();
        let request = start(&mut shell, &dir, t0);
        assert_eq!(request, RequestId(1));

        shell.on_analysis_result(RequestId(0), Ok(demo()), t0 + Duration::from_secs(5));
        assert_eq!(shell.state(), ShellState::Processing);
        let err = AnalysisError::Rejected {
            status: 500,
            detail: "boom".into(),
        };
        shell.on_analysis_result(RequestId(7), Err(err), t0 + Duration::from_secs(5));
        assert_eq!(shell.state(), ShellState::Processing);
        assert!(shell.uploaded_file().is_some());
    }

    #[test]
    fn typed_path_is_submitted_with_enter() {
        let dir = tempdir().unwrap();
        let path = export(&dir, "typed.csv");
        let mut shell = shell();
        let now = Instant::now();
        for c in path.display().to_string().chars() {
            shell.on_key(KeyEvent::from(KeyCode::Char(c)), now);
        }
        shell.on_key(KeyEvent::from(KeyCode::Enter), now);
        assert_eq!(shell.uploaded_file().unwrap().name, "typed.csv");
    }

    #[test]
    fn pasted_path_selects_immediately() {
        let dir = tempdir().unwrap();
        let path = export(&dir, "dropped.csv");
        let mut shell = shell();
        shell.on_paste(&format!("'{}'", path.display()), Instant::now());
        assert_eq!(shell.uploaded_file().unwrap().path, path);
    }
}
