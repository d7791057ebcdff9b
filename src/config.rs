use crate::app_dirs::AppDirs;
use crate::command::Sound;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Settings file contents. Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub muted: bool,
    pub tick_rate_ms: u64,
    /// Sound cues rendered as a terminal bell
    pub bell_sounds: Vec<Sound>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            muted: false,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            bell_sounds: vec![Sound::Correct, Sound::Wrong, Sound::GameEnd],
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("numbermaze_config.json"));
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
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => {
                log::debug!("no settings at {}, using defaults", self.path.display());
                return Config::default();
            }
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("ignoring malformed settings {}: {}", self.path.display(), e);
                Config::default()
            }
        }
    }
}
