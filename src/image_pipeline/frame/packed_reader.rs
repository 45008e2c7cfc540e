//! Reader for tightly packed YUV 4:2:0 frames.
//!
//! Raw dumps from a camera preview carry no header, so the frame geometry
//! comes from the configuration. The chroma planes are described with the
//! same strides a camera HAL would report for the equivalent image.

use tracing::debug;

use crate::image_pipeline::common::config::{CropRect, ExtractionConfig, SourceLayout};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::frame::reader::FrameReader;
use crate::image_pipeline::frame::types::{PlaneLayout, PlanarFrame};

/// Reads headerless I420 or NV21 frames sized by the configuration.
pub struct PackedYuvReader;

impl PackedYuvReader {
    /// Bytes in one packed frame, chroma dimensions rounded up.
    pub fn frame_len(width: usize, height: usize) -> usize {
        width * height + 2 * chroma_samples(width, height)
    }

    fn layouts(width: usize, height: usize, layout: SourceLayout) -> [PlaneLayout; 3] {
        let y_size = width * height;
        let chroma_width = width.div_ceil(2);
        let chroma_samples = chroma_samples(width, height);
        let luma = PlaneLayout {
            offset: 0,
            len: y_size,
            row_stride: width,
            pixel_stride: 1,
        };

        match layout {
            SourceLayout::I420 => [
                luma,
                PlaneLayout {
                    offset: y_size,
                    len: chroma_samples,
                    row_stride: chroma_width,
                    pixel_stride: 1,
                },
                PlaneLayout {
                    offset: y_size + chroma_samples,
                    len: chroma_samples,
                    row_stride: chroma_width,
                    pixel_stride: 1,
                },
            ],
            // V leads each VU pair, so U is the same region shifted by one byte
            SourceLayout::Nv21 => [
                luma,
                PlaneLayout {
                    offset: y_size + 1,
                    len: 2 * chroma_samples - 1,
                    row_stride: 2 * chroma_width,
                    pixel_stride: 2,
                },
                PlaneLayout {
                    offset: y_size,
                    len: 2 * chroma_samples - 1,
                    row_stride: 2 * chroma_width,
                    pixel_stride: 2,
                },
            ],
        }
    }
}

fn chroma_samples(width: usize, height: usize) -> usize {
    width.div_ceil(2) * height.div_ceil(2)
}

impl FrameReader for PackedYuvReader {
    fn read_frame(&self, data: &[u8], config: &ExtractionConfig) -> Result<PlanarFrame> {
        let (width, height) = (config.source_width, config.source_height);
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        let expected = Self::frame_len(width, height);
        debug!(
            "Reading {:?} frame {}x{}, {} bytes (expected {})",
            config.source_layout,
            width,
            height,
            data.len(),
            expected
        );

        let frame_bytes = data.get(..expected).ok_or_else(|| {
            PipelineError::InvalidArgument(format!(
                "{:?} frame {}x{} needs {} bytes, got {}",
                config.source_layout,
                width,
                height,
                expected,
                data.len()
            ))
        })?;

        Ok(PlanarFrame {
            width,
            height,
            data: frame_bytes.to_vec(),
            layouts: Self::layouts(width, height, config.source_layout),
            crop: CropRect::full(width, height),
        })
    }
}
