use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use super::{AudioGateway, CaptureSettings, GatewayError, GatewayResult, SoundList};

/// File extensions listed as recordings
const RECORDING_EXTENSIONS: &[&str] = &["aac", "m4a", "caf", "wav"];

/// Native encoder driven by [`DirectoryGateway`]
///
/// The device owns the actual capture: it opens `path`, encodes with the
/// given settings and writes until stopped.
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    async fn open(&mut self, path: &Path, settings: &CaptureSettings) -> anyhow::Result<()>;

    /// Begin writing, or continue after [`pause`](Self::pause)
    async fn resume(&mut self) -> anyhow::Result<()>;

    async fn pause(&mut self) -> anyhow::Result<()>;

    /// Flush and close the file opened by [`open`](Self::open)
    async fn close(&mut self) -> anyhow::Result<()>;

    /// Device name for logging
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TakeState {
    Prepared,
    Capturing,
    Paused,
}

struct Take {
    path: PathBuf,
    state: TakeState,
}

/// Gateway storing recordings as files in one flat directory
pub struct DirectoryGateway {
    base_dir: PathBuf,
    device: Option<Box<dyn CaptureDevice>>,
    take: Option<Take>,
}

impl DirectoryGateway {
    /// Gateway over `base_dir` that can list and delete but not capture
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            device: None,
            take: None,
        }
    }

    pub fn with_device(base_dir: impl Into<PathBuf>, device: Box<dyn CaptureDevice>) -> Self {
        Self {
            base_dir: base_dir.into(),
            device: Some(device),
            take: None,
        }
    }

    /// Create the recordings directory if it doesn't exist
    pub async fn ensure_dir(&self) -> GatewayResult<()> {
        fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }

    fn device(&mut self) -> GatewayResult<&mut Box<dyn CaptureDevice>> {
        self.device
            .as_mut()
            .ok_or_else(|| GatewayError::new("NoDevice", "no capture device attached"))
    }

    fn take_in(&mut self, allowed: &[TakeState]) -> GatewayResult<&mut Take> {
        match self.take.as_mut() {
            Some(take) if allowed.contains(&take.state) => Ok(take),
            Some(take) => Err(GatewayError::new(
                "InvalidState",
                format!("take {} is {:?}", take.path.display(), take.state),
            )),
            None => Err(GatewayError::new("NotPrepared", "no recording prepared")),
        }
    }

    fn is_recording_file(path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                RECORDING_EXTENSIONS.contains(&ext.as_str())
            }
            None => false,
        }
    }
}

fn device_error(code: &str, err: anyhow::Error) -> GatewayError {
    GatewayError::new(code, format!("{:#}", err))
}

#[async_trait::async_trait]
impl AudioGateway for DirectoryGateway {
    async fn prepare_recording_at_path(
        &mut self,
        file_name: &str,
        settings: &CaptureSettings,
    ) -> GatewayResult<()> {
        if let Some(take) = &self.take {
            if take.state != TakeState::Prepared {
                return Err(GatewayError::new(
                    "Busy",
                    format!("already recording {}", take.path.display()),
                ));
            }
        }

        // A take that never started is released before the device is reopened
        if let Some(stale) = self.take.take() {
            warn!("Discarding unstarted take {}", stale.path.display());
            let closed = self.device()?.close().await;
            if let Err(e) = closed {
                self.take = Some(stale);
                return Err(device_error("CloseFailed", e));
            }
        }

        let path = self.base_dir.join(file_name);
        let device = self.device()?;
        device
            .open(&path, settings)
            .await
            .map_err(|e| device_error("PrepareFailed", e))?;

        info!(
            "Prepared {} ({} Hz, {} ch, {:?}, {:?}) on {}",
            path.display(),
            settings.sample_rate,
            settings.channels,
            settings.quality,
            settings.encoding,
            device.name()
        );

        self.take = Some(Take {
            path,
            state: TakeState::Prepared,
        });

        Ok(())
    }

    async fn start_recording(&mut self) -> GatewayResult<PathBuf> {
        self.take_in(&[TakeState::Prepared, TakeState::Paused])?;
        self.device()?
            .resume()
            .await
            .map_err(|e| device_error("StartFailed", e))?;

        let take = self.take_in(&[TakeState::Prepared, TakeState::Paused])?;
        take.state = TakeState::Capturing;
        debug!("Capturing into {}", take.path.display());
        Ok(take.path.clone())
    }

    async fn pause_recording(&mut self) -> GatewayResult<PathBuf> {
        self.take_in(&[TakeState::Capturing])?;
        self.device()?
            .pause()
            .await
            .map_err(|e| device_error("PauseFailed", e))?;

        let take = self.take_in(&[TakeState::Capturing])?;
        take.state = TakeState::Paused;
        Ok(take.path.clone())
    }

    async fn stop_recording(&mut self) -> GatewayResult<PathBuf> {
        self.take_in(&[TakeState::Capturing, TakeState::Paused])?;
        self.device()?
            .close()
            .await
            .map_err(|e| device_error("StopFailed", e))?;

        let path = self
            .take
            .take()
            .map(|take| take.path)
            .ok_or_else(|| GatewayError::new("NotPrepared", "no recording prepared"))?;
        info!("Finished recording {}", path.display());
        Ok(path)
    }

    async fn delete_sound(&mut self, path: &Path) -> GatewayResult<()> {
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        if escapes || !path.starts_with(&self.base_dir) {
            return Err(GatewayError::new(
                "OutsideBaseDirectory",
                format!("{} is not in {}", path.display(), self.base_dir.display()),
            ));
        }

        fs::remove_file(path).await?;
        info!("Deleted {}", path.display());
        Ok(())
    }

    async fn sound_list(&self) -> GatewayResult<SoundList> {
        let mut entries = fs::read_dir(&self.base_dir).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() || !Self::is_recording_file(&path) {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => warn!("Skipping non UTF-8 file name: {:?}", name),
            }
        }

        // Names are timestamps, so this is also chronological
        names.sort();

        Ok(SoundList {
            sound_list_response: names,
        })
    }

    fn base_directory(&self) -> &Path {
        &self.base_dir
    }
}
