//! Planar frame types

use crate::image_pipeline::common::config::CropRect;
use crate::image_pipeline::planes::ImagePlane;

/// Where one plane lives inside a frame's byte storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    /// First byte of the plane within the frame storage
    pub offset: usize,
    /// Number of bytes addressable from `offset`
    pub len: usize,
    /// Bytes between the start of consecutive rows
    pub row_stride: usize,
    /// Bytes between consecutive samples within a row
    pub pixel_stride: usize,
}

/// An owned multi-plane frame.
///
/// Planes may overlap, which is how a semi-planar buffer is exposed as
/// separate U and V planes.
#[derive(Debug, Clone)]
pub struct PlanarFrame {
    /// Frame width in pixels
    pub width: usize,
    /// Frame height in pixels
    pub height: usize,
    /// Backing bytes for every plane
    pub data: Vec<u8>,
    /// Luma, U and V plane descriptors, in that order
    pub layouts: [PlaneLayout; 3],
    /// Region of the frame holding valid pixels
    pub crop: CropRect,
}

impl PlanarFrame {
    /// Borrowed plane views over the frame storage.
    ///
    /// Layouts reaching past the storage are clamped, so the extractor reports
    /// them as out-of-bounds reads instead of panicking here.
    pub fn planes(&self) -> [ImagePlane<'_>; 3] {
        self.layouts.map(|layout| {
            let start = layout.offset.min(self.data.len());
            let end = layout.offset.saturating_add(layout.len).min(self.data.len());
            ImagePlane::new(&self.data[start..end], layout.row_stride, layout.pixel_stride)
        })
    }
}
