use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::AnalysisError;
use crate::payload::StatisticsPayload;
use crate::runtime::AppEvent;
use crate::upload::UploadedFile;

const FALLBACK_DETAIL: &str = "Failed to analyze data";

/// Identifies one analysis attempt so late answers can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type AnalysisResult = Result<StatisticsPayload, AnalysisError>;

/// The statistics engine boundary: one uploaded export in, one payload out.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, file: &UploadedFile) -> AnalysisResult;
}

/// Talks to the HTTP analysis service.
pub struct HttpAnalyzer {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

impl HttpAnalyzer {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("typewrapped/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn analyze_url(&self) -> String {
        format!("{}/api/analyze", self.base_url)
    }

    /// `GET /` answering `{"status": "healthy"}`.
    pub fn health(&self) -> Result<bool, AnalysisError> {
        let resp = self.client.get(format!("{}/", self.base_url)).send()?;
        let body: HealthResponse = resp.json()?;
        Ok(body.status == "healthy")
    }
}

/// Message to show for a failed response body.
pub fn error_detail(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| FALLBACK_DETAIL.to_string())
}

impl Analyzer for HttpAnalyzer {
    fn analyze(&self, file: &UploadedFile) -> AnalysisResult {
        let form = multipart::Form::new().file("file", &file.path)?;
        let resp = self.client.post(self.analyze_url()).multipart(form).send()?;
        let status = resp.status();
        let body = resp.bytes()?;
        if !status.is_success() {
            return Err(AnalysisError::Rejected {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }
        Ok(StatisticsPayload::from_json(&body)?)
    }
}

/// Serves a payload from disk or the bundled demo, for offline runs.
#[derive(Debug, Clone)]
pub enum FixtureAnalyzer {
    File(PathBuf),
    Demo,
}

impl FixtureAnalyzer {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        FixtureAnalyzer::File(path.as_ref().to_path_buf())
    }
}

impl Analyzer for FixtureAnalyzer {
    fn analyze(&self, _file: &UploadedFile) -> AnalysisResult {
        match self {
            FixtureAnalyzer::File(path) => {
                let bytes = std::fs::read(path)?;
                Ok(StatisticsPayload::from_json(&bytes)?)
            }
            FixtureAnalyzer::Demo => Ok(StatisticsPayload::from_json(crate::demo::payload_bytes())?),
        }
    }
}

/// Run one analysis off the UI thread and post the outcome back as an event.
pub fn spawn_analysis(
    analyzer: Arc<dyn Analyzer>,
    request: RequestId,
    file: UploadedFile,
    tx: Sender<AppEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!(%request, file = %file.name, "analysis started");
        let result = analyzer.analyze(&file);
        if let Err(e) = &result {
            warn!(%request, "analysis failed: {e}");
        }
        // Receiver gone means the app is shutting down.
        let _ = tx.send(AppEvent::Analysis { request, result });
    })
}
