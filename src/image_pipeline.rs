//! Camera preview pipeline module
//!
//! This module turns multi-plane YUV sensor frames into the semi-planar byte
//! buffer the GPU texture loader expects, holds the chroma-key filter
//! parameters the shader is bound with, and prepares the background image
//! the key is composited over.

pub mod common;
pub mod frame;
pub mod planes;
pub mod output;
pub mod filter;
pub mod background;
pub mod conversions;

pub use common::{
    CropRect,
    ExtractionConfig,
    ExtractionConfigBuilder,
    PipelineError,
    Result,
    SourceLayout,
};

pub use frame::{
    FrameReader,
    PackedYuvReader,
    PlaneLayout,
    PlanarFrame,
};

pub use planes::{
    ImagePlane,
    PixelBuffer,
    compose_semi_planar,
    extract,
};

pub use output::{
    FrameWriter,
    RawNv21Writer,
};

pub use filter::{
    ChromaKeyUniforms,
    FilterParameters,
    FilterSettings,
    SharedFilterParameters,
};

pub use background::{
    Orientation,
    load_background,
};

pub use conversions::{
    FrameTimings,
    PreviewPipeline,
};
