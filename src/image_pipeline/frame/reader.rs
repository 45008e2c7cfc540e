use crate::image_pipeline::common::config::ExtractionConfig;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::types::PlanarFrame;

pub trait FrameReader {
    fn read_frame(&self, data: &[u8], config: &ExtractionConfig) -> Result<PlanarFrame>;
}
