use crate::core::{Annotation, Point2D, ViewSize};
use crate::viewer::{Viewer, ViewerError, ViewerResult};

/// A viewer operation, as recorded by `MockViewer`
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCall {
    Resize(u32, u32),
    Downsample(f64),
    Center(f64, f64),
    Rotation(f64),
    Select(Annotation),
    Z(i32),
    T(i32),
}

/// In-memory viewer for testing without a display
///
/// Records every state change so tests can check what playback applied and in
/// which order. Can be told to reject downsample changes to simulate a
/// viewer fault.
#[derive(Debug)]
pub struct MockViewer {
    size: ViewSize,
    downsample: f64,
    center: Point2D,
    rotation: f64,
    selected: Option<Annotation>,
    z: i32,
    t: i32,
    calls: Vec<ViewerCall>,
    reject_downsample: bool,
}

impl MockViewer {
    /// Create a new mock viewer with the given output size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: ViewSize::new(width, height),
            downsample: 1.0,
            center: Point2D::new(0.0, 0.0),
            rotation: 0.0,
            selected: None,
            z: 0,
            t: 0,
            calls: Vec::new(),
            reject_downsample: false,
        }
    }

    /// Fail every downsample change with `ViewerError::InvalidDownsample`
    pub fn set_reject_downsample(&mut self, reject: bool) {
        self.reject_downsample = reject;
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    pub fn selected_object(&self) -> Option<&Annotation> {
        self.selected.as_ref()
    }

    pub fn z_position(&self) -> i32 {
        self.z
    }

    pub fn t_position(&self) -> i32 {
        self.t
    }

    /// Get all recorded calls (for verification)
    pub fn calls(&self) -> &[ViewerCall] {
        &self.calls
    }

    /// Take all recorded calls, leaving the log empty
    pub fn take_calls(&mut self) -> Vec<ViewerCall> {
        self.calls.drain(..).collect()
    }
}

impl Viewer for MockViewer {
    fn size(&self) -> ViewSize {
        self.size
    }

    fn resize_to(&mut self, width: u32, height: u32) -> ViewerResult<()> {
        if width == 0 || height == 0 {
            return Err(ViewerError::InvalidSize { width, height });
        }
        self.calls.push(ViewerCall::Resize(width, height));
        self.size = ViewSize::new(width, height);
        Ok(())
    }

    fn downsample_factor(&self) -> f64 {
        self.downsample
    }

    fn set_downsample_factor(&mut self, downsample: f64) -> ViewerResult<()> {
        if self.reject_downsample || !downsample.is_finite() || downsample <= 0.0 {
            return Err(ViewerError::InvalidDownsample(downsample));
        }
        self.calls.push(ViewerCall::Downsample(downsample));
        self.downsample = downsample;
        Ok(())
    }

    fn set_center_pixel_location(&mut self, x: f64, y: f64) -> ViewerResult<()> {
        self.calls.push(ViewerCall::Center(x, y));
        self.center = Point2D::new(x, y);
        Ok(())
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f64) -> ViewerResult<()> {
        self.calls.push(ViewerCall::Rotation(rotation));
        self.rotation = rotation;
        Ok(())
    }

    fn set_selected_object(&mut self, object: Annotation) -> ViewerResult<()> {
        self.calls.push(ViewerCall::Select(object.clone()));
        self.selected = Some(object);
        Ok(())
    }

    fn set_z_position(&mut self, z: i32) -> ViewerResult<()> {
        if z < 0 {
            return Err(ViewerError::InvalidPlane(z));
        }
        self.calls.push(ViewerCall::Z(z));
        self.z = z;
        Ok(())
    }

    fn set_t_position(&mut self, t: i32) -> ViewerResult<()> {
        if t < 0 {
            return Err(ViewerError::InvalidPlane(t));
        }
        self.calls.push(ViewerCall::T(t));
        self.t = t;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_viewer_records_calls() {
        let mut viewer = MockViewer::new(640, 480);
        viewer.set_downsample_factor(2.0).unwrap();
        viewer.set_rotation(0.5).unwrap();

        assert_eq!(viewer.downsample_factor(), 2.0);
        assert_eq!(viewer.rotation(), 0.5);
        assert_eq!(
            viewer.take_calls(),
            vec![ViewerCall::Downsample(2.0), ViewerCall::Rotation(0.5)]
        );
        assert!(viewer.calls().is_empty());
    }

    #[test]
    fn test_mock_viewer_rejects_invalid_values() {
        let mut viewer = MockViewer::new(640, 480);

        assert_eq!(
            viewer.resize_to(0, 480),
            Err(ViewerError::InvalidSize { width: 0, height: 480 })
        );
        assert_eq!(
            viewer.set_downsample_factor(-1.0),
            Err(ViewerError::InvalidDownsample(-1.0))
        );
        assert_eq!(viewer.set_z_position(-1), Err(ViewerError::InvalidPlane(-1)));

        // Rejected values leave state untouched
        assert_eq!(viewer.size(), ViewSize::new(640, 480));
        assert_eq!(viewer.downsample_factor(), 1.0);
        assert!(viewer.calls().is_empty());
    }
}
