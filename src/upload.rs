use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::UploadError;

/// Columns the statistics backend refuses to work without.
pub const REQUIRED_COLUMNS: [&str; 3] = ["wpm", "acc", "timestamp"];

/// A file that passed client-side validation and may be sent for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub name: String,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Check extension, readability and header of a selected export.
pub fn validate_upload(path: &Path) -> Result<UploadedFile, UploadError> {
    let name = file_name(path);
    // case-sensitive, like the backend
    let is_csv = path.extension().is_some_and(|ext| ext == "csv");
    if !is_csv {
        return Err(UploadError::UnsupportedExtension { name });
    }

    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => UploadError::NotFound(path.to_path_buf()),
        _ => UploadError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    check_header(file)?;

    Ok(UploadedFile {
        path: path.to_path_buf(),
        name,
    })
}

/// Turn a pasted or dropped path into a file path.
///
/// Terminals deliver a dropped file as text: possibly quoted, possibly a
/// `file://` URL, with spaces backslash-escaped.
pub fn path_from_drop(text: &str) -> PathBuf {
    let trimmed = text.trim();
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);
    let without_scheme = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    PathBuf::from(without_scheme.replace("\\ ", " ").replace("%20", " "))
}

/// Sniff the header row only; data rows are the backend's business.
pub fn check_header<R: Read>(reader: R) -> Result<(), UploadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?;
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(UploadError::Empty);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h.trim() == **col))
        .map(|col| col.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(UploadError::MissingColumns(missing))
    }
}
