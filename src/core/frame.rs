use serde::{Deserialize, Serialize};

/// Size of the viewer's output area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSize {
    pub width: u32,
    pub height: u32,
}

impl ViewSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rectangle in image space (full-resolution pixel coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ImageBounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Centroid of the rectangle
    pub fn center(&self) -> Point2D {
        Point2D::new(
            self.x as f64 + self.width as f64 * 0.5,
            self.y as f64 + self.height as f64 * 0.5,
        )
    }
}

/// A point in image space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Depth-slice and timepoint indices of a multi-dimensional image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZtPosition {
    pub z: i32,
    pub t: i32,
}

/// A single recorded viewport state
///
/// Frames are produced by a recorder and handed to playback read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewFrame {
    /// Milliseconds since the recording started
    pub timestamp: i64,

    /// Viewer output size when the frame was captured
    pub size: ViewSize,

    /// Downsample factor (1.0 = full resolution)
    pub downsample: f64,

    /// Visible region in image space
    pub image_bounds: ImageBounds,

    /// Viewer rotation in radians
    pub rotation: f64,

    /// Cursor location in image space, if it was over the image
    pub cursor_position: Option<Point2D>,

    /// Eye tracker gaze location in image space
    pub eye_position: Option<Point2D>,

    /// Current z-slice and timepoint, if the image has them
    pub zt: Option<ZtPosition>,
}

impl ViewFrame {
    /// Create a frame with no cursor, gaze or z/t data
    pub fn new(
        timestamp: i64,
        size: ViewSize,
        downsample: f64,
        image_bounds: ImageBounds,
        rotation: f64,
    ) -> Self {
        Self {
            timestamp,
            size,
            downsample,
            image_bounds,
            rotation,
            cursor_position: None,
            eye_position: None,
            zt: None,
        }
    }

    pub fn with_eye_position(mut self, x: f64, y: f64) -> Self {
        self.eye_position = Some(Point2D::new(x, y));
        self
    }

    pub fn with_cursor_position(mut self, x: f64, y: f64) -> Self {
        self.cursor_position = Some(Point2D::new(x, y));
        self
    }

    pub fn with_zt(mut self, z: i32, t: i32) -> Self {
        self.zt = Some(ZtPosition { z, t });
        self
    }
}
