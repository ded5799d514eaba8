pub mod clip;
pub mod frame;

pub use clip::AudioClip;
pub use frame::AudioFrame;
