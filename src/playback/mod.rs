//! Playback collaborator
//!
//! Playing a recording is a two step affair: [`Player::load`] opens and
//! prepares the clip, [`PlayerHandle::play`] plays it and resolves once
//! playback finished (or failed).

mod decoding;

pub use decoding::DecodingPlayer;

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("playback failed: {0}")]
    Playback(String),
}

#[async_trait::async_trait]
pub trait PlayerHandle: Send {
    /// Play to the end
    async fn play(self: Box<Self>) -> Result<(), PlayerError>;
}

#[async_trait::async_trait]
pub trait Player: Send + Sync {
    /// Load the clip at `path`; `format` is an optional container hint
    async fn load(&self, path: &Path, format: &str) -> Result<Box<dyn PlayerHandle>, PlayerError>;
}
