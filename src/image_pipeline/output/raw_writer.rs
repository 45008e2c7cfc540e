use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::config::ExtractionConfig;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::output::writer::FrameWriter;
use crate::image_pipeline::planes::PixelBuffer;

/// Writes the semi-planar buffer exactly as the texture loader receives it.
pub struct RawNv21Writer;

impl FrameWriter for RawNv21Writer {
    fn write_frame(&self, frame: &PixelBuffer, output: &mut dyn Write, config: &ExtractionConfig) -> Result<()> {
        // The loader sizes its texture from the dimensions alone
        let expected = frame.width.saturating_mul(frame.height).saturating_mul(config.bits_per_pixel as usize) / 8;
        if frame.len() != expected {
            return Err(PipelineError::EncodeError(format!(
                "{}x{} frame holds {} bytes, expected {} at {} bits per pixel",
                frame.width,
                frame.height,
                frame.len(),
                expected,
                config.bits_per_pixel
            )));
        }

        debug!("Writing NV21 frame: {}x{}, {} bytes", frame.width, frame.height, frame.len());
        output.write_all(&frame.data)?;
        Ok(())
    }
}
