use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Lifecycle of one take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Nothing recorded yet
    #[default]
    Idle,
    /// File allocated, gateway preparing and starting capture
    Preparing,
    Recording,
    Paused,
    /// Take finished; the next `record` starts a new file
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Preparing => "preparing",
            SessionState::Recording => "recording",
            SessionState::Paused => "paused",
            SessionState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// A user intent that isn't valid in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("already recording")]
    AlreadyRecording,
    #[error("can't pause, not recording")]
    NotRecording,
    #[error("can't stop, no take in progress")]
    NothingToStop,
}

/// The take currently being recorded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSession {
    pub state: SessionState,
    pub current_file_path: PathBuf,
    pub current_file_name: String,
}

impl RecordingSession {
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// No take in progress: the next `record` allocates a new file
    pub fn is_stopped(&self) -> bool {
        matches!(self.state, SessionState::Idle | SessionState::Stopped)
    }

    /// Label of the primary action button
    pub fn action_label(&self) -> &'static str {
        if self.is_recording() {
            "Pause"
        } else {
            "Record"
        }
    }
}
