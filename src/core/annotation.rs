use serde::{Deserialize, Serialize};
use crate::core::Point2D;

/// Image plane an object belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImagePlane {
    /// Channel (-1 for all channels)
    pub c: i32,
    pub z: i32,
    pub t: i32,
}

impl ImagePlane {
    /// Plane used when no z/t information is available
    pub fn default_plane() -> Self {
        Self { c: -1, z: 0, t: 0 }
    }
}

/// A named point annotation that can be selected in a viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: Option<String>,
    pub points: Vec<Point2D>,
    pub plane: ImagePlane,
}

impl Annotation {
    /// Create an unnamed single-point annotation
    pub fn point(x: f64, y: f64, plane: ImagePlane) -> Self {
        Self {
            name: None,
            points: vec![Point2D::new(x, y)],
            plane,
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Location of the first point, if any
    pub fn location(&self) -> Option<Point2D> {
        self.points.first().copied()
    }
}
