use crate::core::{Annotation, ViewSize};
use crate::viewer::{Viewer, ViewerError, ViewerResult};
use tracing::{debug, info};

/// Headless viewer that reports every applied change through `tracing`
///
/// Used by the command-line player to show playback without a display.
pub struct LoggingViewer {
    name: String,
    size: ViewSize,
    downsample: f64,
    rotation: f64,
    applied: u64,
}

impl LoggingViewer {
    pub fn new(name: &str, size: ViewSize) -> Self {
        debug!("Creating LoggingViewer {} at {}x{}", name, size.width, size.height);
        Self {
            name: name.to_string(),
            size,
            downsample: 1.0,
            rotation: 0.0,
            applied: 0,
        }
    }

    /// Number of center changes seen, one per applied frame
    pub fn frames_applied(&self) -> u64 {
        self.applied
    }
}

impl Viewer for LoggingViewer {
    fn size(&self) -> ViewSize {
        self.size
    }

    fn resize_to(&mut self, width: u32, height: u32) -> ViewerResult<()> {
        if width == 0 || height == 0 {
            return Err(ViewerError::InvalidSize { width, height });
        }
        info!(
            "[{}] resize {}x{} -> {}x{}",
            self.name, self.size.width, self.size.height, width, height
        );
        self.size = ViewSize::new(width, height);
        Ok(())
    }

    fn downsample_factor(&self) -> f64 {
        self.downsample
    }

    fn set_downsample_factor(&mut self, downsample: f64) -> ViewerResult<()> {
        if !downsample.is_finite() || downsample <= 0.0 {
            return Err(ViewerError::InvalidDownsample(downsample));
        }
        self.downsample = downsample;
        Ok(())
    }

    fn set_center_pixel_location(&mut self, x: f64, y: f64) -> ViewerResult<()> {
        self.applied += 1;
        info!(
            "[{}] center=({:.1}, {:.1}) downsample={:.2}",
            self.name, x, y, self.downsample
        );
        Ok(())
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f64) -> ViewerResult<()> {
        if (rotation - self.rotation).abs() > f64::EPSILON {
            info!("[{}] rotation={:.3} rad", self.name, rotation);
        }
        self.rotation = rotation;
        Ok(())
    }

    fn set_selected_object(&mut self, object: Annotation) -> ViewerResult<()> {
        if let Some(p) = object.location() {
            info!(
                "[{}] selected {} at ({:.1}, {:.1})",
                self.name,
                object.name.as_deref().unwrap_or("object"),
                p.x,
                p.y
            );
        }
        Ok(())
    }

    fn set_z_position(&mut self, z: i32) -> ViewerResult<()> {
        debug!("[{}] z={}", self.name, z);
        Ok(())
    }

    fn set_t_position(&mut self, t: i32) -> ViewerResult<()> {
        debug!("[{}] t={}", self.name, t);
        Ok(())
    }
}
