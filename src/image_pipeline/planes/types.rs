//! Plane and pixel buffer types

/// One channel of a multi-plane image, borrowed from the frame that owns it.
#[derive(Debug, Clone, Copy)]
pub struct ImagePlane<'a> {
    /// Plane bytes, addressed from index 0
    pub buffer: &'a [u8],
    /// Bytes between the start of consecutive rows
    pub row_stride: usize,
    /// Bytes between consecutive samples within a row
    pub pixel_stride: usize,
}

impl<'a> ImagePlane<'a> {
    pub fn new(buffer: &'a [u8], row_stride: usize, pixel_stride: usize) -> Self {
        Self {
            buffer,
            row_stride,
            pixel_stride,
        }
    }

    /// A tightly packed plane, one byte per sample and no row padding.
    pub fn packed(buffer: &'a [u8], width: usize) -> Self {
        Self::new(buffer, width, 1)
    }
}

/// Semi-planar output of the extractor.
///
/// Luma fills `[0, width * height)`. The chroma region after it interleaves V
/// at even offsets and U at odd offsets (NV21 order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn luma(&self) -> &[u8] {
        &self.data[..self.luma_len()]
    }

    pub fn chroma(&self) -> &[u8] {
        &self.data[self.luma_len()..]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn luma_len(&self) -> usize {
        (self.width * self.height).min(self.data.len())
    }
}
