// Page rendering for boba-kiosk: themed layout, gallery strip, mascot,
// animated backdrops, toast and overlays.

pub mod backdrop;
pub mod frame_stats;
pub mod gallery;
pub mod mascot;
pub mod page;
pub mod paint;
pub mod toast;

pub use backdrop::{Backdrop, Particles};
pub use frame_stats::FrameStats;
pub use mascot::Mascot;
pub use page::PageCtx;
pub use toast::Toast;
