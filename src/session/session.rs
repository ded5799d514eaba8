use super::catalog::{Catalog, CatalogEntry};
use super::config::SessionConfig;
use super::snapshot::SessionSnapshot;
use super::state::{RecordingSession, SessionState, TransitionError};
use crate::gateway::{AudioEncoding, AudioGateway, CaptureSettings, GatewayError};
use crate::playback::{Player, PlayerError};
use chrono::{Local, NaiveDateTime};
use std::path::Path;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Name of a new take recorded at `at`, e.g. `2024_01_01_120000.aac`
///
/// Names sort chronologically.
pub fn recording_file_name(at: NaiveDateTime, encoding: AudioEncoding) -> String {
    format!("{}.{}", at.format("%Y_%m_%d_%H%M%S"), encoding.extension())
}

/// What a user intent ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    /// Not valid in the current state; nothing was sent to the gateway
    Rejected(TransitionError),
    /// The gateway refused or failed the call
    GatewayFailed(GatewayError),
}

impl CommandOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CommandOutcome::Completed)
    }
}

/// Result of a playback request
#[derive(Debug)]
pub enum PlayOutcome {
    /// Clip loaded; the task resolves when playback ends
    Started(JoinHandle<Result<(), PlayerError>>),
    LoadFailed(PlayerError),
}

type Clock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Records, lists, plays and deletes clips through an audio gateway
///
/// Owns the take in progress and the catalog of recordings. Every change is
/// published as a [`SessionSnapshot`] to subscribers.
///
/// Pause and stop are applied optimistically: the state changes before the
/// gateway answers and stays changed if the gateway fails.
pub struct SessionController {
    config: SessionConfig,
    settings: CaptureSettings,
    gateway: Box<dyn AudioGateway>,
    player: Box<dyn Player>,
    session: RecordingSession,
    catalog: Catalog,
    clock: Clock,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl SessionController {
    pub fn new(
        gateway: Box<dyn AudioGateway>,
        player: Box<dyn Player>,
        config: SessionConfig,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::default());

        let controller = Self {
            config,
            settings: CaptureSettings::FIXED,
            gateway,
            player,
            session: RecordingSession::default(),
            catalog: Catalog::new(),
            clock: Box::new(|| Local::now().naive_local()),
            snapshot_tx,
        };
        controller.publish();
        controller
    }

    /// Replace the wall clock used to name new takes
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.session.state,
            is_recording: self.session.is_recording(),
            action_label: self.session.action_label().to_string(),
            current_file_name: self.session.current_file_name.clone(),
            recordings: self.catalog.entries().to_vec(),
        }
    }

    /// Receive a snapshot after every state or catalog change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }

    fn set_state(&mut self, state: SessionState) {
        debug!("Session {} -> {}", self.session.state, state);
        self.session.state = state;
        self.publish();
    }

    fn restore(&mut self, previous: RecordingSession) {
        self.session = previous;
        self.publish();
    }

    /// Start a new take, or resume a paused one
    pub async fn record(&mut self) -> CommandOutcome {
        if matches!(
            self.session.state,
            SessionState::Recording | SessionState::Preparing
        ) {
            warn!("Already recording!");
            return CommandOutcome::Rejected(TransitionError::AlreadyRecording);
        }

        let previous = self.session.clone();

        if self.session.is_stopped() {
            let file_name = recording_file_name((self.clock)(), self.settings.encoding);
            let file_path = self.gateway.base_directory().join(&file_name);
            info!("Prepare recording path: {}", file_path.display());

            self.session.current_file_name = file_name;
            self.session.current_file_path = file_path;
            self.set_state(SessionState::Preparing);

            if let Err(e) = self
                .gateway
                .prepare_recording_at_path(&self.session.current_file_name, &self.settings)
                .await
            {
                error!("Failed to prepare recording: {}", e);
                self.restore(previous);
                return CommandOutcome::GatewayFailed(e);
            }
        }

        match self.gateway.start_recording().await {
            Ok(path) => {
                info!("Recording into {}", path.display());
                self.set_state(SessionState::Recording);
                CommandOutcome::Completed
            }
            Err(e) => {
                error!("Failed to start recording: {}", e);
                self.restore(previous);
                CommandOutcome::GatewayFailed(e)
            }
        }
    }

    pub async fn pause(&mut self) -> CommandOutcome {
        if self.session.state != SessionState::Recording {
            warn!("Can't pause, not recording!");
            return CommandOutcome::Rejected(TransitionError::NotRecording);
        }

        self.set_state(SessionState::Paused);

        match self.gateway.pause_recording().await {
            Ok(path) => {
                info!("Paused {}", path.display());
                CommandOutcome::Completed
            }
            Err(e) => {
                error!("Failed to pause recording (session stays paused): {}", e);
                CommandOutcome::GatewayFailed(e)
            }
        }
    }

    /// Finish the take and add it to the catalog
    pub async fn stop(&mut self) -> CommandOutcome {
        if !matches!(
            self.session.state,
            SessionState::Recording | SessionState::Paused
        ) {
            warn!("Can't stop, not recording!");
            return CommandOutcome::Rejected(TransitionError::NothingToStop);
        }

        self.set_state(SessionState::Stopped);

        match self.gateway.stop_recording().await {
            Ok(path) => {
                let entry = CatalogEntry::new(
                    self.session.current_file_name.clone(),
                    self.session.current_file_path.clone(),
                );
                if !self.catalog.push(entry) {
                    warn!(
                        "{} is already in the catalog",
                        self.session.current_file_path.display()
                    );
                }
                self.publish();
                info!(
                    "Stopped recording {} ({} recordings)",
                    path.display(),
                    self.catalog.len()
                );
                CommandOutcome::Completed
            }
            Err(e) => {
                error!("Failed to stop recording (session stays stopped): {}", e);
                CommandOutcome::GatewayFailed(e)
            }
        }
    }

    /// Primary action: pause while recording, otherwise record
    pub async fn toggle(&mut self) -> CommandOutcome {
        if self.session.is_recording() {
            self.pause().await
        } else {
            self.record().await
        }
    }

    /// Play a recording, stopping the take in progress first
    ///
    /// Load and play are each preceded by a fixed delay
    /// ([`SessionConfig::load_delay`], [`SessionConfig::play_delay`]).
    pub async fn play(&mut self, path: &Path) -> PlayOutcome {
        if self.session.is_recording() {
            self.stop().await;
        }

        sleep(self.config.load_delay).await;
        info!("Loading {}", path.display());

        let handle = match self.player.load(path, "").await {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to load the sound: {}", e);
                return PlayOutcome::LoadFailed(e);
            }
        };

        sleep(self.config.play_delay).await;

        let shown = path.display().to_string();
        PlayOutcome::Started(tokio::spawn(async move {
            let result = handle.play().await;
            match &result {
                Ok(()) => info!("Successfully finished playing {}", shown),
                Err(e) => error!("Playback of {} failed: {}", shown, e),
            }
            result
        }))
    }

    pub async fn delete(&mut self, path: &Path) -> CommandOutcome {
        info!("Deleting {}", path.display());

        match self.gateway.delete_sound(path).await {
            Ok(()) => {
                if self.catalog.remove(path).is_none() {
                    debug!("{} was not in the catalog", path.display());
                }
                self.publish();
                CommandOutcome::Completed
            }
            Err(e) => {
                error!("Failed to delete {}: {}", path.display(), e);
                CommandOutcome::GatewayFailed(e)
            }
        }
    }

    /// Replace the catalog with the gateway's directory listing
    pub async fn refresh_catalog(&mut self) -> CommandOutcome {
        match self.gateway.sound_list().await {
            Ok(list) => {
                self.catalog =
                    Catalog::from_listing(self.gateway.base_directory(), list.sound_list_response);
                self.publish();
                info!("Sound list: {} recordings", self.catalog.len());
                CommandOutcome::Completed
            }
            Err(e) => {
                error!("Failed to list sounds [{}]: {}", e.code, e.message);
                CommandOutcome::GatewayFailed(e)
            }
        }
    }
}
