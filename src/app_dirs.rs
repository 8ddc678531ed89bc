use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typewrapped";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join(format!("{APP_NAME}.log")))
    }

    /// Where share cards are written.
    pub fn export_dir() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.data_dir().join("cards"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_under_app_dir() {
        if let Some(path) = AppDirs::log_path() {
            assert!(path.ends_with("typewrapped/typewrapped.log"));
        }
    }
}
