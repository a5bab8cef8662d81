// Soundtrack decode, playback, and the persisted play/pause toggle for boba-kiosk.

pub mod decode;
pub mod error;
pub mod player;
pub mod toggle;

pub use error::AudioError;
pub use player::{MUSIC_VOLUME, Player};
pub use toggle::{AudioSink, MusicToggle, RefusingSink};
