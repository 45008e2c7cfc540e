use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::config::{CropRect, ExtractionConfig},
    common::error::{PipelineError, Result},
    conversions::timing::{self, FrameTimings},
    frame::{FrameReader, PackedYuvReader},
    output::{FrameWriter, RawNv21Writer},
    planes::{self, PixelBuffer},
};

/// Takes one camera frame from raw bytes to the semi-planar texture buffer.
///
/// A failed frame leaves nothing behind: the writer only ever sees a fully
/// extracted buffer, so callers can drop the frame and keep the previous
/// texture.
pub struct PreviewPipeline<R: FrameReader, W: FrameWriter> {
    reader: R,
    writer: W,
    config: ExtractionConfig,
}

impl PreviewPipeline<PackedYuvReader, RawNv21Writer> {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            reader: PackedYuvReader,
            writer: RawNv21Writer,
            config,
        }
    }
}

impl<R: FrameReader, W: FrameWriter> PreviewPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ExtractionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, crop: &CropRect) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if crop.width == 0 || crop.height == 0 {
            return Err(PipelineError::InvalidDimensions(crop.width, crop.height));
        }

        if let Some(max) = self.config.max_dimension {
            if crop.width > max || crop.height > max {
                warn!(
                    "Crop dimensions {}x{} exceed maximum {}",
                    crop.width, crop.height, max
                );
                return Err(PipelineError::InvalidDimensions(crop.width, crop.height));
            }
        }

        Ok(())
    }

    /// Reads, crops and extracts a frame without writing it.
    pub fn extract_frame(&self, input_data: &[u8]) -> Result<PixelBuffer> {
        self.extract_timed(input_data, &mut FrameTimings::new())
    }

    fn extract_timed(&self, input_data: &[u8], timings: &mut FrameTimings) -> Result<PixelBuffer> {
        let frame = timings.record(timing::READ_FRAME, || self.reader.read_frame(input_data, &self.config))?;

        let crop = self.config.crop.unwrap_or(frame.crop);
        if !crop.fits_within(frame.width, frame.height) {
            warn!(?crop, width = frame.width, height = frame.height, "Crop falls outside the source frame");
            return Err(PipelineError::CropOutsideFrame {
                crop,
                width: frame.width,
                height: frame.height,
            });
        }
        timings.record(timing::VALIDATE_DIMENSIONS, || self.validate_dimensions(&crop))?;

        timings.record(timing::EXTRACT_PLANES, || {
            planes::extract(&frame.planes(), crop, self.config.bits_per_pixel)
        })
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<FrameTimings> {
        let mut timings = FrameTimings::new();
        info!("Starting YUV to NV21 conversion");

        let pixels = self.extract_timed(input_data, &mut timings)?;

        timings.record(timing::WRITE_FRAME, || self.writer.write_frame(&pixels, output, &self.config))?;

        info!(
            width = pixels.width,
            height = pixels.height,
            "Conversion complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(timings)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<FrameTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // Extract before touching the output so a bad frame leaves no file behind
        let mut timings = FrameTimings::new();
        let pixels = self.extract_timed(&input_data, &mut timings)?;

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        timings.record(timing::WRITE_FRAME, || {
            self.writer.write_frame(&pixels, &mut output_file, &self.config)
        })?;

        Ok(timings)
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ExtractionConfig) {
        self.config = config;
    }
}
