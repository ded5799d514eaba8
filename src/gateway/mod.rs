//! Audio gateway: the native capability that captures, lists and deletes recordings
//!
//! The session controller never touches audio or files itself. Every
//! capture and file operation goes through an [`AudioGateway`]:
//! - prepare a take under a file name with fixed capture settings
//! - start / pause / stop the capture
//! - delete a recording and list the recordings directory

mod directory;

pub use directory::{CaptureDevice, DirectoryGateway};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Capture quality tier requested from the native encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioQuality {
    Low,
    Medium,
    High,
}

/// Output encoding requested from the native encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioEncoding {
    Aac,
    Lpcm,
}

impl AudioEncoding {
    /// File extension for recordings in this encoding (no leading dot)
    pub fn extension(self) -> &'static str {
        match self {
            AudioEncoding::Aac => "aac",
            AudioEncoding::Lpcm => "wav",
        }
    }
}

/// Parameters passed to the gateway when preparing a take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (1 = mono)
    pub channels: u16,
    pub quality: AudioQuality,
    pub encoding: AudioEncoding,
}

impl CaptureSettings {
    /// Settings every take is recorded with. Not user adjustable.
    pub const FIXED: CaptureSettings = CaptureSettings {
        sample_rate: 22050,
        channels: 1,
        quality: AudioQuality::Low,
        encoding: AudioEncoding::Aac,
    };
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Listing of the gateway's recordings directory (file names only)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundList {
    #[serde(rename = "soundListResponse")]
    pub sound_list_response: Vec<String>,
}

/// Failure reported by the gateway
///
/// Native layers report a short machine code alongside a message; either may
/// be missing, in which case it is left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("gateway error [{code}]: {message}")]
pub struct GatewayError {
    pub code: String,
    pub message: String,
}

impl GatewayError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Error without a machine code
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: String::new(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("{:?}", err.kind()), err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Native audio capability consumed by the session controller
///
/// Implementations:
/// - [`DirectoryGateway`]: recordings in a local directory, capture delegated
///   to a [`CaptureDevice`]
/// - test doubles recording every call
#[async_trait::async_trait]
pub trait AudioGateway: Send + Sync {
    /// Allocate the native recorder for `file_name` (relative to
    /// [`base_directory`](Self::base_directory))
    async fn prepare_recording_at_path(
        &mut self,
        file_name: &str,
        settings: &CaptureSettings,
    ) -> GatewayResult<()>;

    /// Start or resume capture into the prepared file
    async fn start_recording(&mut self) -> GatewayResult<PathBuf>;

    async fn pause_recording(&mut self) -> GatewayResult<PathBuf>;

    /// Finish the take and close the file
    async fn stop_recording(&mut self) -> GatewayResult<PathBuf>;

    async fn delete_sound(&mut self, path: &Path) -> GatewayResult<()>;

    /// Flat listing of recording file names, in gateway order
    async fn sound_list(&self) -> GatewayResult<SoundList>;

    /// Directory recordings are stored in
    fn base_directory(&self) -> &Path;
}
