pub mod apply;
pub mod clock;
pub mod driver;
pub mod engine;
pub mod ticker;

pub use apply::{apply_frame, resize_viewer, EYE_TRACKING_NAME};
pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::PlaybackCommand;
pub use engine::PlaybackController;
pub use ticker::Ticker;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Running,
}

impl From<bool> for PlaybackState {
    fn from(running: bool) -> Self {
        if running {
            PlaybackState::Running
        } else {
            PlaybackState::Stopped
        }
    }
}
