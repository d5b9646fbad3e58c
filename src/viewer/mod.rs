pub mod logging;
pub mod mock;

pub use logging::LoggingViewer;
pub use mock::{MockViewer, ViewerCall};

use crate::core::{Annotation, ViewSize};
use thiserror::Error;

/// Errors a viewer can raise when asked to change its state
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewerError {
    #[error("viewer cannot be resized to {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("invalid downsample factor: {0}")]
    InvalidDownsample(f64),

    #[error("invalid center location: ({x}, {y})")]
    InvalidLocation { x: f64, y: f64 },

    #[error("invalid rotation: {0}")]
    InvalidRotation(f64),

    #[error("plane index out of range: {0}")]
    InvalidPlane(i32),

    #[error("viewer error: {0}")]
    Other(String),
}

/// Result type for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Trait for image viewers that recorded frames can be applied to
///
/// Implementations own their validation: out-of-range values are either
/// clamped or rejected with a `ViewerError`.
pub trait Viewer {
    /// Get the current output size
    fn size(&self) -> ViewSize;

    /// Resize the output area
    ///
    /// Viewers embedded in a window with chrome should resize the window by
    /// the difference between the requested and current output size.
    fn resize_to(&mut self, width: u32, height: u32) -> ViewerResult<()>;

    /// Get the current downsample factor
    fn downsample_factor(&self) -> f64;

    /// Set the downsample factor
    fn set_downsample_factor(&mut self, downsample: f64) -> ViewerResult<()>;

    /// Center the view on an image-space location
    fn set_center_pixel_location(&mut self, x: f64, y: f64) -> ViewerResult<()>;

    /// Get the current rotation in radians
    fn rotation(&self) -> f64;

    /// Set the rotation in radians
    fn set_rotation(&mut self, rotation: f64) -> ViewerResult<()>;

    /// Replace the selected object
    fn set_selected_object(&mut self, object: Annotation) -> ViewerResult<()>;

    /// Set the current z-slice
    fn set_z_position(&mut self, z: i32) -> ViewerResult<()>;

    /// Set the current timepoint
    fn set_t_position(&mut self, t: i32) -> ViewerResult<()>;
}
