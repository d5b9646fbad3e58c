use crate::core::{Annotation, ImagePlane, ViewFrame, ViewSize};
use crate::viewer::{Viewer, ViewerResult};
use tracing::debug;

/// Name given to the point annotation marking a recorded gaze position
pub const EYE_TRACKING_NAME: &str = "Eye tracking position";

/// Resize the viewer to a recorded output size, if it differs
pub fn resize_viewer<V: Viewer + ?Sized>(viewer: &mut V, size: ViewSize) -> ViewerResult<()> {
    if viewer.size() == size {
        return Ok(());
    }
    viewer.resize_to(size.width, size.height)
}

/// Apply a recorded frame to a viewer
///
/// Order matters: the viewer is resized before the downsample and center are
/// set, since both are interpreted relative to the output size. Stops at the
/// first change the viewer rejects.
pub fn apply_frame<V: Viewer + ?Sized>(viewer: &mut V, frame: &ViewFrame) -> ViewerResult<()> {
    resize_viewer(viewer, frame.size)?;

    viewer.set_downsample_factor(frame.downsample)?;

    let center = frame.image_bounds.center();
    viewer.set_center_pixel_location(center.x, center.y)?;

    viewer.set_rotation(frame.rotation)?;

    if let Some(eye) = frame.eye_position {
        let mut point = Annotation::point(eye.x, eye.y, ImagePlane::default_plane());
        point.set_name(EYE_TRACKING_NAME);
        viewer.set_selected_object(point)?;
        debug!("Eye position: ({}, {})", eye.x, eye.y);
    }

    if let Some(zt) = frame.zt {
        viewer.set_z_position(zt.z)?;
        viewer.set_t_position(zt.t)?;
    }

    Ok(())
}
