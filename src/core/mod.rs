pub mod annotation;
pub mod frame;

pub use annotation::{Annotation, ImagePlane};
pub use frame::{ImageBounds, Point2D, ViewFrame, ViewSize, ZtPosition};
