use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};

use crate::analysis::{AnalysisResult, RequestId};

/// Unified event type consumed by the app runner
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste; terminals deliver dropped files this way.
    Paste(String),
    Resize(u16, u16),
    Tick,
    /// Posted by the analysis worker thread.
    Analysis {
        request: RequestId,
        result: AnalysisResult,
    },
}

/// Source of terminal and worker events
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;

    /// Handle for other threads to post into the same queue.
    fn sender(&self) -> Sender<AppEvent>;
}

fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(key) => Some(AppEvent::Key(key)),
        CtEvent::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        CtEvent::Paste(text) => Some(AppEvent::Paste(text)),
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        CtEvent::FocusGained | CtEvent::FocusLost => None,
    }
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let reader_tx = tx.clone();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if let Some(ev) = translate(ev) {
                        if reader_tx.send(ev).is_err() {
                            break;
                        }
                    }
                }
                Err(_) => break,
            }
        });

        Self { tx, rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-backed event source for tests
pub struct TestEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl Default for TestEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.event_source.sender()
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_returns_tick_on_timeout() {
        let es = TestEventSource::new();
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            AppEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let es = TestEventSource::new();
        es.sender().send(AppEvent::Resize(80, 24)).unwrap();
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            AppEvent::Resize(80, 24) => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn worker_events_share_the_queue() {
        let runner = Runner::new(TestEventSource::new(), FixedTicker::new(Duration::from_millis(10)));
        let tx = runner.sender();
        std::thread::spawn(move || {
            tx.send(AppEvent::Paste("/tmp/results.csv".into())).unwrap();
        })
        .join()
        .unwrap();

        match runner.step() {
            AppEvent::Paste(p) => assert_eq!(p, "/tmp/results.csv"),
            _ => panic!("expected Paste event"),
        }
    }

    #[test]
    fn focus_changes_are_dropped() {
        assert!(translate(CtEvent::FocusGained).is_none());
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(translate(CtEvent::Key(key)), Some(AppEvent::Key(_))));
    }
}
