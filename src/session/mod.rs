//! Recording session management
//!
//! This module provides the `SessionController` that manages:
//! - The take lifecycle (idle, preparing, recording, paused, stopped)
//! - The catalog of known recordings
//! - Playback requests, stopping an active take first
//! - Snapshots of all of the above for the presentation layer

mod catalog;
mod config;
mod session;
mod snapshot;
mod state;

pub use catalog::{Catalog, CatalogEntry};
pub use config::{SessionConfig, DEFAULT_LOAD_DELAY, DEFAULT_PLAY_DELAY};
pub use session::{recording_file_name, CommandOutcome, PlayOutcome, SessionController};
pub use snapshot::SessionSnapshot;
pub use state::{RecordingSession, SessionState, TransitionError};
