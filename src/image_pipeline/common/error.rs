use thiserror::Error;

use crate::image_pipeline::common::config::CropRect;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode frame: {0}")]
    EncodeError(String),

    #[error("Plane {plane} read out of bounds: {requested} bytes at position {position}, buffer holds {available}")]
    OutOfBounds {
        plane: usize,
        position: usize,
        requested: usize,
        available: usize,
    },

    #[error("Crop {crop:?} does not fit a {width}x{height} frame")]
    CropOutsideFrame {
        crop: CropRect,
        width: usize,
        height: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
