use std::path::Path;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use super::{Player, PlayerError, PlayerHandle};
use crate::audio::{AudioClip, AudioFrame};

/// Frame length handed to the sink
pub const PLAYBACK_FRAME_MS: u64 = 100;

/// Player that decodes clips and streams their frames into a sink
///
/// Frames are sent in real time: each one is released when the previous
/// one would have finished playing. Whoever drains the receiver is the
/// output device.
pub struct DecodingPlayer {
    sink: mpsc::Sender<AudioFrame>,
}

impl DecodingPlayer {
    pub fn new(sink: mpsc::Sender<AudioFrame>) -> Self {
        Self { sink }
    }
}

#[async_trait::async_trait]
impl Player for DecodingPlayer {
    async fn load(&self, path: &Path, format: &str) -> Result<Box<dyn PlayerHandle>, PlayerError> {
        let owned_path = path.to_path_buf();
        let format = format.to_string();

        // Decoding is CPU bound
        let clip = tokio::task::spawn_blocking(move || AudioClip::open(&owned_path, &format))
            .await
            .map_err(|e| PlayerError::Load {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
            .map_err(|e| PlayerError::Load {
                path: path.display().to_string(),
                reason: format!("{:#}", e),
            })?;

        Ok(Box::new(DecodedClip {
            clip,
            sink: self.sink.clone(),
        }))
    }
}

struct DecodedClip {
    clip: AudioClip,
    sink: mpsc::Sender<AudioFrame>,
}

#[async_trait::async_trait]
impl PlayerHandle for DecodedClip {
    async fn play(self: Box<Self>) -> Result<(), PlayerError> {
        let frames = self.clip.frames(PLAYBACK_FRAME_MS);
        info!(
            "Playing {} ({:.1}s, {} frames)",
            self.clip.path,
            self.clip.duration_seconds,
            frames.len()
        );

        let started = Instant::now();
        let mut offset = std::time::Duration::ZERO;

        for frame in frames {
            let frame_duration = frame.duration();
            self.sink
                .send(frame)
                .await
                .map_err(|_| PlayerError::Playback("output sink closed".to_string()))?;

            offset += frame_duration;
            sleep_until(started + offset).await;
        }

        debug!("Finished streaming {}", self.clip.path);
        Ok(())
    }
}
