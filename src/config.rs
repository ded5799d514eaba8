use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::session::{SessionConfig, DEFAULT_LOAD_DELAY, DEFAULT_PLAY_DELAY};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub recordings_path: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaybackConfig {
    pub load_delay_ms: u64,
    pub play_delay_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: DEFAULT_LOAD_DELAY.as_millis() as u64,
            play_delay_ms: DEFAULT_PLAY_DELAY.as_millis() as u64,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Recordings directory with `~` and environment variables expanded
    pub fn recordings_dir(&self) -> Result<PathBuf> {
        let expanded = shellexpand::full(&self.storage.recordings_path)?;
        Ok(PathBuf::from(expanded.as_ref()))
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            load_delay: Duration::from_millis(self.playback.load_delay_ms),
            play_delay: Duration::from_millis(self.playback.play_delay_ms),
        }
    }
}
