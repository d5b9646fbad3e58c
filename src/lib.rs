//! Replays recorded viewer navigation (pan, zoom, rotation, focal plane)
//! against a live viewer in real time.

pub mod config;
pub mod core;
pub mod playback;
pub mod tracker;
pub mod viewer;

pub use config::{ConfigError, PlaybackConfig};
pub use crate::core::{Annotation, ImageBounds, Point2D, ViewFrame, ViewSize};
pub use playback::{PlaybackCommand, PlaybackController, PlaybackState};
pub use tracker::{FrameSource, TrackerError, ViewTracker};
pub use viewer::{Viewer, ViewerError};
