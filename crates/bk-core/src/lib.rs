//! Configuration, types, and shared structures for boba-kiosk.
//!
//! This crate contains the theme catalogue, the scrolling gallery state,
//! the persisted playback record, and the kiosk configuration logic used
//! across the boba-kiosk workspace.

pub mod carousel;
pub mod config;
pub mod error;
pub mod playback;
pub mod theme;

pub use carousel::{Carousel, CarouselTuning};
pub use config::KioskConfig;
pub use error::CoreError;
pub use playback::{PlaybackState, PlaybackStore};
pub use theme::{Theme, ThemeStyle};
