//! Plane extraction module
//!
//! Converts three-plane 4:2:0 images into one contiguous semi-planar buffer.

mod extractor;
mod compose;
pub mod types;


pub use extractor::extract;
pub use compose::compose_semi_planar;
pub use types::{ImagePlane, PixelBuffer};
