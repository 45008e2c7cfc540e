use std::io::Write;
use crate::image_pipeline::common::config::ExtractionConfig;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::planes::PixelBuffer;

pub trait FrameWriter {
    fn write_frame(&self, frame: &PixelBuffer, output: &mut dyn Write, config: &ExtractionConfig) -> Result<()>;
}
