//! Pipeline conversions module
//!
//! This module contains the orchestration that takes a raw frame through
//! reading, cropping, extraction and writing.

mod preview;
mod timing;

#[cfg(test)]
mod tests;

pub use preview::PreviewPipeline;
pub use timing::FrameTimings;
