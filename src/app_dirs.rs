use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "numbermaze";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Log file location; the TUI owns the terminal so logs go to disk
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join("numbermaze.log"))
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|proj_dirs| proj_dirs.data_local_dir().join("numbermaze.log"))
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|pd| pd.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_names_app() {
        if let Some(path) = AppDirs::log_path() {
            assert!(path.ends_with("numbermaze.log"));
        }
    }

    #[test]
    fn test_config_path_is_json() {
        if let Some(path) = AppDirs::config_path() {
            assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
        }
    }
}
