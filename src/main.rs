use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::info;

use typewrapped::{
    analysis::{Analyzer, FixtureAnalyzer, HttpAnalyzer},
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    error::AnalysisError,
    logging::init_logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
};

const TICK_RATE_MS: u64 = 20;

/// your year of typing, wrapped
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Turn a Monkeytype CSV export into an animated slide deck of your typing year, right in the terminal."
)]
pub struct Cli {
    /// monkeytype CSV export to analyze right away
    file: Option<PathBuf>,

    /// base url of the analysis backend
    #[clap(long)]
    api_url: Option<String>,

    /// read the statistics payload from a JSON file instead of the backend
    #[clap(long, conflicts_with = "demo")]
    payload: Option<PathBuf>,

    /// use the bundled demo payload; no backend needed
    #[clap(long)]
    demo: bool,

    /// check that the backend is up and exit
    #[clap(long)]
    check_api: bool,

    /// log filter, e.g. `debug` or `typewrapped=trace` (RUST_LOG wins)
    #[clap(long)]
    log_level: Option<String>,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Stored config with command line overrides applied
    fn load_config(&self) -> Config {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let mut config = store.load();
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }

    fn analyzer(&self, config: &Config) -> Result<Arc<dyn Analyzer>, AnalysisError> {
        if self.demo {
            return Ok(Arc::new(FixtureAnalyzer::Demo));
        }
        if let Some(path) = &self.payload {
            return Ok(Arc::new(FixtureAnalyzer::from_file(path)));
        }
        Ok(Arc::new(HttpAnalyzer::new(
            &config.api_url,
            config.request_timeout(),
        )?))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = cli.load_config();

    if let Some(path) = AppDirs::log_path() {
        if let Err(e) = init_logging(&config.log_level, &path) {
            eprintln!("logging disabled: {e}");
        }
    }

    if cli.check_api {
        return check_api(&config);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let analyzer = cli.analyzer(&config)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let size = terminal.size()?;
    let mut app = App::new(
        &config,
        analyzer,
        runner.sender(),
        Rect::new(0, 0, size.width, size.height),
        AppDirs::export_dir(),
    );
    if let Some(file) = &cli.file {
        // a rejection stays visible on the home screen
        let _ = app.select_file(file, Instant::now());
    }
    info!(api_url = %config.api_url, demo = cli.demo, "started");

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn check_api(config: &Config) -> Result<(), Box<dyn Error>> {
    let http = HttpAnalyzer::new(&config.api_url, config.request_timeout())?;
    match http.health() {
        Ok(true) => {
            println!("{} is healthy", config.api_url);
            Ok(())
        }
        Ok(false) => Err(format!("{} answered but is not healthy", config.api_url).into()),
        Err(e) => Err(format!("{} is unreachable: {e}", config.api_url).into()),
    }
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        let event = runner.step();
        app.handle_event(event, Instant::now());
        if app.should_quit {
            info!("quit");
            return Ok(());
        }
    }
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use tempfile::tempdir;

    fn app(config: &Config) -> App {
        let (tx, _rx) = mpsc::channel();
        App::new(
            config,
            Arc::new(FixtureAnalyzer::Demo),
            tx,
            Rect::new(0, 0, 80, 24),
            std::env::temp_dir(),
        )
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["typewrapped"]);

        assert_eq!(cli.file, None);
        assert_eq!(cli.api_url, None);
        assert_eq!(cli.payload, None);
        assert!(!cli.demo);
        assert!(!cli.check_api);
    }

    #[test]
    fn test_cli_file_and_flags() {
        let cli = Cli::parse_from([
            "typewrapped",
            "results.csv",
            "--api-url",
            "http://10.0.0.2:8000",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.file, Some(PathBuf::from("results.csv")));
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_demo_conflicts_with_payload() {
        assert!(Cli::try_parse_from(["typewrapped", "--demo", "--payload", "p.json"]).is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let stored = Config {
            api_url: "http://stored:8000".into(),
            min_processing_ms: 10,
            ..Config::default()
        };
        FileConfigStore::with_path(&path).save(&stored).unwrap();

        let cli = Cli::parse_from([
            "typewrapped",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "http://flag:8000",
        ]);
        let config = cli.load_config();
        assert_eq!(config.api_url, "http://flag:8000");
        assert_eq!(config.min_processing_ms, 10);
    }

    #[test]
    fn test_cli_picks_analyzer() {
        let config = Config::default();
        assert!(Cli::parse_from(["typewrapped", "--demo"]).analyzer(&config).is_ok());
        assert!(Cli::parse_from(["typewrapped"]).analyzer(&config).is_ok());
    }

    #[test]
    fn test_tick_rate_constant() {
        assert_eq!(TICK_RATE_MS, 20);
    }

    #[test]
    fn test_ui_function_home_state() {
        use ratatui::backend::TestBackend;

        let app = app(&Config::default());
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Go to Monkeytype"));
    }

    #[test]
    fn test_ui_function_wrapped_state() {
        use ratatui::backend::TestBackend;
        use typewrapped::runtime::AppEvent;

        let dir = tempdir().unwrap();
        let csv = dir.path().join("results.csv");
        std::fs::write(&csv, typewrapped::demo::sample_export()).unwrap();

        let config = Config {
            upload_ack_ms: 0,
            min_processing_ms: 0,
            transition_ms: 0,
            ..Config::default()
        };
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(
            &config,
            Arc::new(FixtureAnalyzer::Demo),
            tx,
            Rect::new(0, 0, 80, 24),
            dir.path().into(),
        );
        let now = Instant::now();
        app.select_file(&csv, now).unwrap();
        app.handle_event(AppEvent::Tick, now);
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        app.handle_event(event, now);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("typewrapped 2025"));
        assert!(content.contains("01 / 11"));
    }
}
