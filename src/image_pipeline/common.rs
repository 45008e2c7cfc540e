//! Common utilities module
//!
//! This module contains the error type, geometry and configuration shared
//! across the image pipeline.

pub mod error;
pub mod config;

pub use error::{PipelineError, Result};
pub use config::{
    CropRect,
    ExtractionConfig,
    ExtractionConfigBuilder,
    SourceLayout,
};
