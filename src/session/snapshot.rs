use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use super::state::SessionState;

/// Read-only view of a session for the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,

    /// Whether capture is running
    pub is_recording: bool,

    /// "Pause" while recording, otherwise "Record"
    pub action_label: String,

    /// File name of the take in progress (empty before the first take)
    pub current_file_name: String,

    /// Known recordings, in catalog order
    pub recordings: Vec<CatalogEntry>,
}
