use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wait before loading a clip for playback
///
/// The player has no ready signal after a take was closed; loading too early
/// races its initialization.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(100);

/// Wait between load and play, for the same reason
pub const DEFAULT_PLAY_DELAY: Duration = Duration::from_millis(100);

/// Configuration for a session controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub load_delay: Duration,
    pub play_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            load_delay: DEFAULT_LOAD_DELAY,
            play_delay: DEFAULT_PLAY_DELAY,
        }
    }
}
