use std::path::PathBuf;

use thiserror::Error;

/// Reasons a selected file is turned away before any request is made.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please upload a CSV file ({name} is not a .csv export)")]
    UnsupportedExtension { name: String },
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("The CSV file is empty")]
    Empty,
    #[error("Not a Monkeytype export: missing column(s) {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("The CSV header could not be parsed: {0}")]
    Malformed(#[from] csv::Error),
}

/// Structured decode errors for the statistics payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Malformed statistics payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Analysis did not succeed ({status}): {message}")]
    Status { status: String, message: String },
    #[error("Statistics field {field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Failures of the single request to the statistics backend.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Could not reach the analysis service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("Could not read the uploaded file: {0}")]
    Io(#[from] std::io::Error),
}
