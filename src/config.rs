use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub upload_ack_ms: u64,
    pub min_processing_ms: u64,
    pub transition_ms: u64,
    pub wheel_threshold: f64,
    pub wheel_debounce_ms: u64,
    pub wheel_step_units: f64,
    pub swipe_threshold: f64,
    pub cell_width_units: f64,
    pub cell_height_units: f64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 120,
            upload_ack_ms: 800,
            min_processing_ms: 1500,
            transition_ms: 500,
            wheel_threshold: 30.0,
            wheel_debounce_ms: 50,
            wheel_step_units: 40.0,
            swipe_threshold: 50.0,
            cell_width_units: 8.0,
            cell_height_units: 16.0,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Convert a cell displacement into gesture units.
    pub fn cells_to_units(&self, columns: i32, rows: i32) -> (f64, f64) {
        (
            columns as f64 * self.cell_width_units,
            rows as f64 * self.cell_height_units,
        )
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typewrapped") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typewrapped_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => tracing::warn!(path = %self.path.display(), "ignoring invalid config: {e}"),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
