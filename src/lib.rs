pub mod audio;
pub mod config;
pub mod gateway;
pub mod playback;
pub mod session;

pub use audio::{AudioClip, AudioFrame};
pub use config::Config;
pub use gateway::{
    AudioEncoding, AudioGateway, AudioQuality, CaptureDevice, CaptureSettings, DirectoryGateway,
    GatewayError, SoundList,
};
pub use playback::{DecodingPlayer, Player, PlayerError, PlayerHandle};
pub use session::{
    Catalog, CatalogEntry, CommandOutcome, PlayOutcome, RecordingSession, SessionConfig,
    SessionController, SessionSnapshot, SessionState,
};
