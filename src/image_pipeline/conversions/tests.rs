use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::config::{CropRect, ExtractionConfig, SourceLayout};
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::conversions::PreviewPipeline;
use crate::image_pipeline::frame::{FrameReader, PackedYuvReader, PlaneLayout, PlanarFrame};
use crate::image_pipeline::output::{FrameWriter, RawNv21Writer};
use crate::image_pipeline::planes::PixelBuffer;

/// Packed I420 frame: luma counts up from 0, U is 128, V is 64.
fn i420_frame(width: usize, height: usize) -> PlanarFrame {
    let y_size = width * height;
    let chroma = (width / 2) * (height / 2);
    let mut data: Vec<u8> = (0..y_size).map(|i| i as u8).collect();
    data.extend(std::iter::repeat_n(128u8, chroma));
    data.extend(std::iter::repeat_n(64u8, chroma));

    PlanarFrame {
        width,
        height,
        data,
        layouts: [
            PlaneLayout { offset: 0, len: y_size, row_stride: width, pixel_stride: 1 },
            PlaneLayout { offset: y_size, len: chroma, row_stride: width / 2, pixel_stride: 1 },
            PlaneLayout { offset: y_size + chroma, len: chroma, row_stride: width / 2, pixel_stride: 1 },
        ],
        crop: CropRect::full(width, height),
    }
}

struct MockReader {
    should_fail: bool,
    mock_frame: Option<PlanarFrame>,
}

impl FrameReader for MockReader {
    fn read_frame(&self, _data: &[u8], _config: &ExtractionConfig) -> Result<PlanarFrame> {
        if self.should_fail {
            return Err(PipelineError::InvalidArgument("Mock read error".to_string()));
        }
        Ok(self.mock_frame.clone().unwrap_or_else(|| i420_frame(8, 8)))
    }
}

struct MockWriter {
    should_fail: bool,
    written_frames: Arc<Mutex<Vec<PixelBuffer>>>,
}

impl FrameWriter for MockWriter {
    fn write_frame(&self, frame: &PixelBuffer, _output: &mut dyn Write, _config: &ExtractionConfig) -> Result<()> {
        if self.should_fail {
            return Err(PipelineError::EncodeError("Mock encode error".to_string()));
        }
        self.written_frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}

fn mock_pipeline(
    reader_fails: bool,
    writer_fails: bool,
    mock_frame: Option<PlanarFrame>,
    config: ExtractionConfig,
) -> (PreviewPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<PixelBuffer>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader { should_fail: reader_fails, mock_frame };
    let writer = MockWriter { should_fail: writer_fails, written_frames: written.clone() };
    (PreviewPipeline::with_custom(reader, writer, config), written)
}

#[test]
fn test_config_builder() {
    let config = ExtractionConfig::builder()
        .source_size(1280, 720)
        .source_layout(SourceLayout::Nv21)
        .crop(Some(CropRect::new(40, 0, 1280, 640)))
        .bits_per_pixel(12)
        .validate_dimensions(false)
        .max_dimension(Some(4096))
        .build();

    assert_eq!((config.source_width, config.source_height), (1280, 720));
    assert_eq!(config.source_layout, SourceLayout::Nv21);
    assert_eq!(config.crop, Some(CropRect { top: 40, left: 0, width: 1280, height: 640 }));
    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(4096));
}

#[test]
fn test_config_defaults() {
    let config = ExtractionConfig::builder().build();

    assert_eq!(config.bits_per_pixel, 12);
    assert_eq!(config.crop, None);
    assert!(config.validate_dimensions);
}

#[test]
fn test_successful_conversion() {
    let (pipeline, written) = mock_pipeline(false, false, None, ExtractionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake frame data", &mut output);

    assert!(result.is_ok());
    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].len(), 8 * 8 * 3 / 2);
    assert_eq!(&written[0].chroma()[..4], &[64, 128, 64, 128]);
}

#[test]
fn test_reader_failure() {
    let (pipeline, written) = mock_pipeline(true, false, None, ExtractionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake frame data", &mut output);

    assert!(matches!(result, Err(PipelineError::InvalidArgument(_))));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let (pipeline, _) = mock_pipeline(false, true, None, ExtractionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake frame data", &mut output);

    assert!(matches!(result, Err(PipelineError::EncodeError(_))));
}

#[test]
fn test_crop_from_config_is_applied() {
    let config = ExtractionConfig::builder()
        .crop(Some(CropRect::new(2, 2, 4, 4)))
        .build();
    let (pipeline, _) = mock_pipeline(false, false, None, config);

    let pixels = pipeline.extract_frame(b"fake frame data").unwrap();

    assert_eq!((pixels.width, pixels.height), (4, 4));
    assert_eq!(&pixels.luma()[..4], &[18, 19, 20, 21]);
}

#[test]
fn test_crop_outside_frame_writes_nothing() {
    let config = ExtractionConfig::builder()
        .crop(Some(CropRect::new(4, 4, 8, 8)))
        .build();
    let (pipeline, written) = mock_pipeline(false, false, None, config);

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake frame data", &mut output);

    assert!(matches!(
        result,
        Err(PipelineError::CropOutsideFrame { width: 8, height: 8, .. })
    ));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_crop_past_right_edge_does_not_wrap_rows() {
    // 4x4 I420 frame; a 4-wide crop starting at column 2 would pick up the
    // first pixels of the next row if it were allowed through.
    let mut data: Vec<u8> = (0..16).collect();
    data.extend([128; 8]);
    let config = ExtractionConfig::builder()
        .source_size(4, 4)
        .crop(Some(CropRect::new(0, 2, 4, 2)))
        .build();
    let pipeline = PreviewPipeline::with_custom(PackedYuvReader, RawNv21Writer, config);

    let result = pipeline.extract_frame(&data);

    match result {
        Err(PipelineError::CropOutsideFrame { crop, width, height }) => {
            assert_eq!(crop.right(), Some(6));
            assert_eq!((width, height), (4, 4));
        }
        other => panic!("expected CropOutsideFrame, got {:?}", other),
    }
}

#[test]
fn test_crop_touching_frame_edges_is_accepted() {
    let config = ExtractionConfig::builder()
        .crop(Some(CropRect::new(4, 4, 4, 4)))
        .build();
    let (pipeline, _) = mock_pipeline(false, false, None, config);

    let pixels = pipeline.extract_frame(b"fake frame data").unwrap();

    assert_eq!(&pixels.luma()[..4], &[36, 37, 38, 39]);
}

#[test]
fn test_crop_with_overflowing_edge_is_rejected() {
    let config = ExtractionConfig::builder()
        .crop(Some(CropRect::new(0, usize::MAX, 2, 2)))
        .validate_dimensions(false)
        .build();
    let (pipeline, _) = mock_pipeline(false, false, None, config);

    let result = pipeline.extract_frame(b"fake frame data");

    assert!(matches!(result, Err(PipelineError::CropOutsideFrame { .. })));
}

#[test]
fn test_dimension_validation_failure() {
    let config = ExtractionConfig::builder()
        .max_dimension(Some(16))
        .build();
    let (pipeline, _) = mock_pipeline(false, false, Some(i420_frame(32, 8)), config);

    let result = pipeline.extract_frame(b"fake frame data");

    assert!(matches!(result, Err(PipelineError::InvalidDimensions(32, 8))));
}

#[test]
fn test_dimension_validation_disabled() {
    let config = ExtractionConfig::builder()
        .max_dimension(Some(16))
        .validate_dimensions(false)
        .build();
    let (pipeline, _) = mock_pipeline(false, false, Some(i420_frame(32, 8)), config);

    let result = pipeline.extract_frame(b"fake frame data");

    assert!(result.is_ok());
}

#[test]
fn test_empty_crop_is_rejected() {
    let config = ExtractionConfig::builder()
        .crop(Some(CropRect::new(0, 0, 0, 4)))
        .build();
    let (pipeline, _) = mock_pipeline(false, false, None, config);

    let result = pipeline.extract_frame(b"fake frame data");

    assert!(matches!(result, Err(PipelineError::InvalidDimensions(0, 4))));
}

#[test]
fn test_timings_cover_every_step() {
    let (pipeline, _) = mock_pipeline(false, false, None, ExtractionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let timings = pipeline.convert_with_timings(b"fake frame data", &mut output).unwrap();

    for step in ["read_frame", "validate_dimensions", "extract_planes", "write_frame"] {
        assert!(timings.get_step(step).is_some(), "missing {}", step);
    }
    assert!(timings.total_duration() >= timings.get_step("write_frame").unwrap());
}

#[test]
fn test_set_config_replaces_config() {
    let (mut pipeline, _) = mock_pipeline(false, false, None, ExtractionConfig::default());

    pipeline.set_config(ExtractionConfig::builder().bits_per_pixel(16).build());

    assert_eq!(pipeline.config().bits_per_pixel, 16);
    assert_eq!(pipeline.extract_frame(b"fake frame data").unwrap().len(), 8 * 8 * 2);
}
