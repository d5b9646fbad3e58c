pub mod view_tracker;

pub use view_tracker::ViewTracker;

use crate::core::ViewFrame;
use thiserror::Error;

/// Errors raised while building a recording
#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("frame timestamp {timestamp} ms precedes previous frame at {previous} ms")]
    OutOfOrder { timestamp: i64, previous: i64 },
}

/// Read-only access to a recorded sequence of frames
///
/// Frames are ordered by non-decreasing timestamp. Lookups must be cheap and
/// non-blocking since they run on every playback tick.
pub trait FrameSource: Send + Sync {
    /// Check if the recording has no frames
    fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Get the number of recorded frames
    fn frame_count(&self) -> usize;

    /// Get a frame by index
    fn frame_at(&self, index: usize) -> Option<&ViewFrame>;

    /// Get the frame covering a time (ms since recording start), or None if the
    /// time lies outside the recording
    fn frame_for_time(&self, time: i64) -> Option<&ViewFrame>;

    /// Check if a frame is the final frame of the recording
    ///
    /// `frame` must be a reference handed out by this source, such as the
    /// result of `frame_for_time`; copies are not recognised.
    fn is_last_frame(&self, frame: &ViewFrame) -> bool;
}
